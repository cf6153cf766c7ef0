//! Asset bundle declarations consumed by the build pipeline.
//!
//! The explorer page ships one concatenated/minified script bundle and one
//! compiled stylesheet. This module only declares what goes into them and in
//! what order; the pipeline that performs the work is external and has no
//! runtime coupling to the engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Declaration of the explorer page's script and stylesheet bundles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    /// Banner comment prepended to the minified script bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,

    /// Script sources, concatenated in order (widget libraries first)
    pub scripts: Vec<String>,

    /// Destination of the minified script bundle
    pub script_dest: String,

    /// Stylesheet sources, compiled in order
    pub stylesheets: Vec<String>,

    /// Destination of the compiled stylesheet bundle
    pub stylesheet_dest: String,

    /// Globs watched for rebuild triggers
    #[serde(default)]
    pub watch: Vec<String>,
}

impl AssetBundle {
    /// Scripts in concatenation order.
    #[must_use]
    pub fn script_order(&self) -> &[String] {
        &self.scripts
    }

    /// Stylesheets in compilation order.
    #[must_use]
    pub fn stylesheet_order(&self) -> &[String] {
        &self.stylesheets
    }

    /// Check the declaration for shapes the pipeline cannot process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when a source list is empty or a
    /// destination also appears among the sources.
    pub fn check(&self) -> Result<()> {
        if self.scripts.is_empty() {
            return Err(Error::ConfigError(
                "asset bundle declares no scripts".to_string(),
            ));
        }
        if self.stylesheets.is_empty() {
            return Err(Error::ConfigError(
                "asset bundle declares no stylesheets".to_string(),
            ));
        }
        if self.scripts.contains(&self.script_dest) {
            return Err(Error::ConfigError(format!(
                "script destination is also a source: {}",
                self.script_dest
            )));
        }
        if self.stylesheets.contains(&self.stylesheet_dest) {
            return Err(Error::ConfigError(format!(
                "stylesheet destination is also a source: {}",
                self.stylesheet_dest
            )));
        }
        Ok(())
    }
}

impl Default for AssetBundle {
    /// The stock explorer bundle: third-party widget libraries first, the
    /// explorer script last so it binds to widgets already defined.
    fn default() -> Self {
        Self {
            banner: None,
            scripts: vec![
                "vendor/jquery.js".to_string(),
                "vendor/underscore.js".to_string(),
                "vendor/bootstrap.js".to_string(),
                "vendor/bootstrap-typeahead.js".to_string(),
                "vendor/bootstrap-tooltip.js".to_string(),
                "vendor/bootstrap-popover.js".to_string(),
                "vendor/jquery-textrange.js".to_string(),
                "vendor/localforage.js".to_string(),
                "static/js/explorer.js".to_string(),
            ],
            script_dest: "static/js/explorer.min.js".to_string(),
            stylesheets: vec![
                "vendor/bootstrap.less".to_string(),
                "static/css/explorer.less".to_string(),
            ],
            stylesheet_dest: "static/css/explorer.min.css".to_string(),
            watch: vec!["vendor/**/*".to_string(), "static/**/*".to_string()],
        }
    }
}
