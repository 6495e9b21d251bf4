//! Fixtures shared by the integration tests: level documents built in code,
//! an in-memory level source and scratch level directories.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use sparty::level::{parse_level, LevelDescription, LevelError, LevelSource};

/// One `<product>` inside a conveyor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductXml {
    placement: String,
    attributes: Vec<(&'static str, String)>,
}

impl ProductXml {
    /// Product at `placement`, e.g. `"0"` or `"+200"`.
    pub fn at(placement: &str) -> Self {
        Self {
            placement: placement.to_owned(),
            attributes: Vec::new(),
        }
    }

    /// Sets the shape property.
    #[must_use]
    pub fn shape(self, shape: &str) -> Self {
        self.with("shape", shape)
    }

    /// Sets the colour property.
    #[must_use]
    pub fn color(self, color: &str) -> Self {
        self.with("color", color)
    }

    /// Sets the content property.
    #[must_use]
    pub fn content(self, content: &str) -> Self {
        self.with("content", content)
    }

    /// Marks the product as one the player must kick off the belt.
    #[must_use]
    pub fn kick(self) -> Self {
        self.with("kick", "yes")
    }

    fn with(mut self, name: &'static str, value: &str) -> Self {
        self.attributes.push((name, value.to_owned()));
        self
    }

    fn render(&self, out: &mut String) {
        let _ = write!(out, r#"<product placement="{}""#, self.placement);
        for (name, value) in &self.attributes {
            let _ = write!(out, r#" {name}="{value}""#);
        }
        out.push_str("/>");
    }
}

/// Builder for a level document.
///
/// ```
/// use test_utils::{LevelXml, ProductXml};
/// let xml = LevelXml::new()
///     .beam(242.0, 437.0, -185.0)
///     .conveyor(150.0, 400.0, 100.0, &[ProductXml::at("0")])
///     .build();
/// assert!(xml.starts_with("<level"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelXml {
    size: Option<(u32, u32)>,
    items: Vec<String>,
}

impl LevelXml {
    /// Empty level with the default size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level size.
    #[must_use]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Adds Sparty with its input pin at `pin`.
    #[must_use]
    pub fn sparty(self, x: f64, y: f64, pin: (f64, f64)) -> Self {
        self.item(format!(
            r#"<sparty x="{x}" y="{y}" height="300" pin="{},{}" kick-duration="0.25" kick-speed="1000"/>"#,
            pin.0, pin.1
        ))
    }

    /// Adds a beam; its output pin sits 80 pixels right of `x`.
    #[must_use]
    pub fn beam(self, x: f64, y: f64, sender: f64) -> Self {
        self.item(format!(r#"<beam x="{x}" y="{y}" sender="{sender}"/>"#))
    }

    /// Adds a sensor with one output panel per property.
    #[must_use]
    pub fn sensor(self, x: f64, y: f64, outputs: &[&str]) -> Self {
        let panels: String = outputs.iter().map(|name| format!("<{name}/>")).collect();
        self.item(format!(r#"<sensor x="{x}" y="{y}">{panels}</sensor>"#))
    }

    /// Adds an 800 pixel conveyor whose panel sits at the belt origin.
    #[must_use]
    pub fn conveyor(self, x: f64, y: f64, speed: f64, products: &[ProductXml]) -> Self {
        let mut body = String::new();
        for product in products {
            product.render(&mut body);
        }
        self.item(format!(
            r#"<conveyor x="{x}" y="{y}" speed="{speed}" height="800">{body}</conveyor>"#
        ))
    }

    /// Adds a scoreboard.
    #[must_use]
    pub fn scoreboard(self, good: i32, bad: i32, goal: &str) -> Self {
        self.item(format!(
            r#"<scoreboard x="700" y="40" good="{good}" bad="{bad}">{goal}</scoreboard>"#
        ))
    }

    /// Adds a pre-placed gate, e.g. `"and"` or `"sr"`.
    #[must_use]
    pub fn gate(self, name: &str, x: f64, y: f64) -> Self {
        self.item(format!(r#"<{name} x="{x}" y="{y}"/>"#))
    }

    fn item(mut self, xml: String) -> Self {
        self.items.push(xml);
        self
    }

    /// Renders the document.
    pub fn build(&self) -> String {
        let mut out = String::from("<level");
        if let Some((width, height)) = self.size {
            let _ = write!(out, r#" size="{width},{height}""#);
        }
        out.push_str("><items>");
        for item in &self.items {
            out.push_str(item);
        }
        out.push_str("</items></level>");
        out
    }
}

/// The sorting level used across suites: Sparty wired by pin at (800,500),
/// a beam whose pin is at (322,437), one belt at (150,400) carrying a
/// single red square, and a scoreboard worth +10/-5.
pub fn sorting_level(kick: bool) -> String {
    let product = if kick {
        ProductXml::at("0").kick()
    } else {
        ProductXml::at("0")
    };
    LevelXml::new()
        .sparty(345.0, 390.0, (800.0, 500.0))
        .beam(242.0, 437.0, -185.0)
        .conveyor(150.0, 400.0, 100.0, &[product])
        .scoreboard(10, -5, "Sort the products")
        .build()
}

/// Level source serving documents held in memory.
#[derive(Debug, Clone, Default)]
pub struct InlineLevels(BTreeMap<u32, String>);

impl InlineLevels {
    /// Source with no levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `text` as level `number`.
    #[must_use]
    pub fn with(mut self, number: u32, text: impl Into<String>) -> Self {
        self.0.insert(number, text.into());
        self
    }
}

impl LevelSource for InlineLevels {
    fn load(&self, number: u32) -> Result<LevelDescription, LevelError> {
        let text = self.0.get(&number).ok_or(LevelError::NoSuchLevel(number))?;
        parse_level(text)
    }
}

/// Scratch directory of level files, removed on drop.
#[derive(Debug)]
pub struct LevelDir {
    path: PathBuf,
}

impl LevelDir {
    /// Creates an empty directory under the system temp dir. `name` must be
    /// unique per test.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("sparty-{}-{name}", std::process::id()));
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("cannot create {}: {e}", path.display()));
        Self { path }
    }

    /// Writes `text` as `level<number>.xml`.
    ///
    /// # Panics
    /// Panics if the file cannot be written.
    pub fn write(&self, number: u32, text: &str) -> PathBuf {
        let file = self.path.join(format!("level{number}.xml"));
        fs::write(&file, text).unwrap_or_else(|e| panic!("cannot write {}: {e}", file.display()));
        file
    }

    /// Directory path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LevelDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.path).ok();
    }
}
