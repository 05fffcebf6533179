use map_engine::{load_texture, resolve_app_paths, AppError, AppPaths, LoopConfig, Scene, Texture};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{TopDownScene, WalkthroughScene};

const PLAYER_SPRITE_FILE: &str = "player.png";

/// Which of the three campus programs is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Top-down map, avatar drawn from the player sprite.
    Sprite,
    /// Top-down map with labels, avatar drawn as a wedge.
    Wedge,
    /// First-person wireframe walkthrough.
    Walkthrough,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Sprite => "sprite",
            Variant::Wedge => "wedge",
            Variant::Walkthrough => "walkthrough",
        }
    }
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app(variant: Variant) -> Result<AppWiring, AppError> {
    info!(variant = variant.as_str(), "startup");

    let scene: Box<dyn Scene> = match variant {
        Variant::Sprite => {
            let paths = resolve_app_paths()?;
            let texture = load_player_texture(&paths)?;
            Box::new(TopDownScene::with_sprite(texture))
        }
        Variant::Wedge => Box::new(TopDownScene::with_wedge()),
        Variant::Walkthrough => Box::new(WalkthroughScene::new()),
    };

    Ok(AppWiring {
        config: LoopConfig::default(),
        scene,
    })
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn load_player_texture(paths: &AppPaths) -> Result<Texture, AppError> {
    let path = paths.sprite_path(PLAYER_SPRITE_FILE);
    let texture = load_texture(&path)?;
    info!(
        path = %path.display(),
        width = texture.width(),
        height = texture.height(),
        "sprite_loaded"
    );
    Ok(texture)
}
