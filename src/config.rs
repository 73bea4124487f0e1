use std::path::Path;

use confique::{Config as DeriveConfig, File, FileFormat};

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// How many arrays/objects may be open at once before the document is rejected.
    #[config(default = 128, env = "ARBOR_MAX_DEPTH")]
    pub max_depth: usize,

    /// Accept documents that carry extra text after the top-level value. The extra text is
    /// ignored.
    #[config(default = false, env = "ARBOR_ALLOW_TRAILING_INPUT")]
    pub allow_trailing_input: bool,
}

impl Config {
    /// Environment variables take precedence over the TOML file, if one is given. The file is
    /// read as TOML whatever its extension, and it must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Config::builder().env();
        if let Some(path) = path {
            let layer = File::with_format(path, FileFormat::Toml).required().load()?;
            builder = builder.preloaded(layer);
        }
        builder.load()
    }

    pub fn parse_options(&self) -> arbor::ParseOptions {
        arbor::ParseOptions::new()
            .with_max_depth(self.max_depth)
            .with_trailing_input(self.allow_trailing_input)
    }
}
