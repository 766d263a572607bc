//! Asset manifest and loading for the arcade.
//!
//! Everything loads at startup. A missing file is logged and its slot stays
//! empty; games keep running silently (or with placeholder shapes) rather
//! than failing, so the binary works from a bare checkout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use flux_audio::SoundBank;

/// Sound keys, shared between the games and the loader.
pub mod keys {
    pub const ADVANCE: &str = "advance";
    pub const SQUIRREL: [&str; 2] = ["squirrel_a", "squirrel_b"];
    pub const TRIMMER: &str = "trimmer";
    pub const FACE_CLICK: &str = "face_click";
    pub const GAVEL: &str = "gavel";
    pub const EGO_HIT: &str = "ego_hit";
    pub const EGO_POP: &str = "ego_pop";
    pub const DOG_HOLD: &str = "dog_hold";
    pub const DOG_BITE: &str = "dog_bite";
    pub const SPAGHETTI_OK: &str = "spaghetti_ok";
    pub const SPAGHETTI_WRONG: &str = "spaghetti_wrong";
    pub const DENIED: &str = "denied";
    pub const STOMP: &str = "stomp";
    pub const STOMP_HIT: &str = "stomp_hit";
    pub const SAUSAGE_CLICK: &str = "sausage_click";
}

/// Every sound the arcade may play, including the per-game background
/// loops named by the catalog.
const SOUND_KEYS: [&str; 22] = [
    keys::ADVANCE,
    "squirrel_a",
    "squirrel_b",
    keys::TRIMMER,
    keys::FACE_CLICK,
    keys::GAVEL,
    keys::EGO_HIT,
    keys::EGO_POP,
    keys::DOG_HOLD,
    keys::DOG_BITE,
    keys::SPAGHETTI_OK,
    keys::SPAGHETTI_WRONG,
    keys::DENIED,
    keys::STOMP,
    keys::STOMP_HIT,
    keys::SAUSAGE_CLICK,
    "bg_cloud",
    "bg_face",
    "bg_ego",
    "bg_spaghetti",
    "bg_form",
    "bg_stomp",
];

const SOUND_EXTENSIONS: [&str; 3] = ["ogg", "wav", "mp3"];

/// `bg_legal` doubles as the held loop for the legal-text game, so it is
/// registered with the rest but listed separately for clarity.
pub const BG_LEGAL: &str = "bg_legal";

fn find_sound_file(audio_dir: &Path, key: &str) -> Option<PathBuf> {
    SOUND_EXTENSIONS
        .iter()
        .map(|ext| audio_dir.join(format!("{key}.{ext}")))
        .find(|p| p.is_file())
}

/// Register every known sound from `<asset_dir>/audio/<key>.{ogg,wav,mp3}`.
pub fn load_sound_bank(asset_dir: &Path) -> SoundBank {
    let audio_dir = asset_dir.join("audio");
    let mut bank = SoundBank::new();
    for key in SOUND_KEYS.iter().copied().chain(std::iter::once(BG_LEGAL)) {
        // register_file records an absent handle (with a warning) when the
        // fallback path is missing too, which is exactly what we want.
        let path = find_sound_file(&audio_dir, key)
            .unwrap_or_else(|| audio_dir.join(format!("{key}.wav")));
        bank.register_file(key, &path);
    }
    log::info!("Sound bank: {} keys registered", bank.len());
    bank
}

/// Decoded images uploaded as egui textures. A slot may be empty when the
/// file was missing or undecodable; games draw placeholder shapes then.
pub struct ImageBank {
    textures: HashMap<String, egui::TextureHandle>,
}

/// Image keys the stomp game draws with.
pub const IMAGE_KEYS: [&str; 4] = ["foot", "creature_0", "creature_1", "creature_2"];

impl ImageBank {
    pub fn load(asset_dir: &Path, egui_ctx: &egui::Context) -> Self {
        let image_dir = asset_dir.join("images");
        let mut textures = HashMap::new();
        for key in IMAGE_KEYS {
            let path = image_dir.join(format!("{key}.png"));
            match image::open(&path) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    let handle =
                        egui_ctx.load_texture(key, color_image, egui::TextureOptions::LINEAR);
                    textures.insert(key.to_string(), handle);
                }
                Err(e) => {
                    log::warn!("No image for '{}' ({:?}): {}", key, path, e);
                }
            }
        }
        log::info!("Image bank: {}/{} textures", textures.len(), IMAGE_KEYS.len());
        Self { textures }
    }

    /// Empty bank for contexts with no asset directory.
    pub fn empty() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(key)
    }
}
