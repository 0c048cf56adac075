use crate::constants::{GRADIENT_URL, MODEL_URL};

/// Where the front-end fetches the scene's static assets from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPaths {
    pub model_url: String,
    pub gradient_url: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            model_url: MODEL_URL.to_string(),
            gradient_url: GRADIENT_URL.to_string(),
        }
    }
}

impl AssetPaths {
    /// Replace the defaults with any non-blank override.
    pub fn with_overrides(
        mut self,
        model_url: Option<String>,
        gradient_url: Option<String>,
    ) -> Self {
        if let Some(url) = model_url.filter(|u| !u.trim().is_empty()) {
            self.model_url = url.trim().to_string();
        }
        if let Some(url) = gradient_url.filter(|u| !u.trim().is_empty()) {
            self.gradient_url = url.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_overrides_keep_defaults() {
        let paths = AssetPaths::default().with_overrides(Some("  ".into()), None);
        assert_eq!(paths, AssetPaths::default());
        assert_eq!(paths.model_url, "models/scene.gltf");
    }

    #[test]
    fn overrides_replace_each_path() {
        let paths = AssetPaths::default()
            .with_overrides(Some("cdn/ship.glb".into()), Some(" ramps/5.png ".into()));
        assert_eq!(paths.model_url, "cdn/ship.glb");
        assert_eq!(paths.gradient_url, "ramps/5.png");
    }
}
