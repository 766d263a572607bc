use std::sync::Arc;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

pub struct PlatformConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Four-Second Flux".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
        }
    }
}

impl PlatformConfig {
    fn attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(&self.title)
            .with_resizable(self.resizable)
            .with_inner_size(winit::dpi::LogicalSize::new(self.width, self.height))
    }
}

pub fn create_window(event_loop: &ActiveEventLoop, config: &PlatformConfig) -> Arc<Window> {
    let window = event_loop
        .create_window(config.attributes())
        .expect("Failed to create window");
    log::info!(
        "Window created: '{}' {}x{}",
        config.title,
        config.width,
        config.height
    );
    Arc::new(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let config = PlatformConfig::default();
        assert!(config.width > 0 && config.height > 0);
        assert!(config.resizable);
        assert!(config.title.contains("Flux"));
    }
}
