use crate::config::{Config, ImagePath};
use circle_menu::DeltaMode;
use clap::Parser;

/// Command line overrides, applied on top of the configuration file (and again on reload).
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "circle-menu-demo", version, about, long_about = None)]
pub struct Args {
    /// Number of sectors on the circle
    #[arg(short = 'n', long)]
    pub divisions: Option<u32>,

    /// Sector that starts out selected
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Leave the circle where the drag ended instead of centering the top sector
    #[arg(long)]
    pub no_snap: bool,

    /// Wrap each rotation step to the shortest angle
    #[arg(long)]
    pub shortest: bool,

    /// Circle image to show (replaces the configured image list)
    #[arg(short, long)]
    pub image: Option<ImagePath>,
}

impl Args {
    pub fn apply(&self, config: &mut Config) {
        if let Some(divisions) = self.divisions {
            config.menu.divisions = divisions;
        }
        if let Some(top) = self.top {
            config.menu.initial_top = Some(top);
        }
        if self.no_snap {
            config.menu.snap = false;
        }
        if self.shortest {
            config.menu.delta_mode = DeltaMode::Shortest;
        }
        if let Some(image) = &self.image {
            config.images = vec![image.clone()];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keep_config() {
        let args = Args::try_parse_from(["circle-menu-demo"]).unwrap();
        let mut config = Config::default();
        config.images = vec![ImagePath::new("a.png"), ImagePath::new("b.png")];

        args.apply(&mut config);
        assert_eq!(config.menu.divisions, 4);
        assert!(config.menu.snap);
        assert_eq!(config.images.len(), 2);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "circle-menu-demo",
            "-n",
            "6",
            "--top",
            "2",
            "--no-snap",
            "--shortest",
            "--image",
            "wheel.png",
        ])
        .unwrap();
        let mut config = Config::default();
        config.images = vec![ImagePath::new("a.png"), ImagePath::new("b.png")];

        args.apply(&mut config);
        assert_eq!(config.menu.divisions, 6);
        assert_eq!(config.menu.initial_top, Some(2));
        assert!(!config.menu.snap);
        assert_eq!(config.menu.delta_mode, DeltaMode::Shortest);
        assert_eq!(config.images, vec![ImagePath::new("wheel.png")]);
    }
}
