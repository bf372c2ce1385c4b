use glam::IVec2;
use pennant::Obj;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, rc::Rc};

use super::{crop, IRect, Image, Sprite};
use crate::asset;

/// Identifies one sprite atlas in an [`AtlasCache`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct AtlasId(pub u32);

#[derive(Clone, Serialize, Deserialize)]
pub struct FrameDefinition {
    pub rect: IRect,
    #[serde(default)]
    pub anchor: IVec2,
}

#[derive(Default, Serialize, Deserialize)]
struct AtlasDefinition {
    frames: Vec<FrameDefinition>,
}

/// An indexed list of sprite frames cut from one sheet.
#[derive(Clone, Default)]
pub struct SpriteAtlas {
    frames: Vec<Rc<Sprite>>,
}

impl SpriteAtlas {
    pub fn new(frames: Vec<Sprite>) -> Self {
        SpriteAtlas {
            frames: frames.into_iter().map(Rc::new).collect(),
        }
    }
    pub fn from_sheet(sheet: &Image, frames: &[FrameDefinition]) -> Self {
        SpriteAtlas {
            frames: frames
                .iter()
                .map(|frame| Rc::new(Sprite::new(crop(sheet, frame.rect), frame.anchor)))
                .collect(),
        }
    }

    /// Loads `<name>.png` and its `<name>.yaml` frame list from `dir`.
    pub fn load_from(dir: &Path, name: &str) -> asset::Result<Self> {
        let sheet = asset::read_png(&dir.join(format!("{name}.png")))?;
        let definition: AtlasDefinition = asset::read_yaml(&dir.join(format!("{name}.yaml")))?;
        Ok(Self::from_sheet(&sheet, &definition.frames))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
    pub fn frame(&self, index: u32) -> Option<&Rc<Sprite>> {
        self.frames.get(index as usize)
    }
}

struct AtlasStore {
    atlases: HashMap<AtlasId, SpriteAtlas>,
    empty: Rc<Sprite>,
}

/// Shared lookup of every loaded atlas.
///
/// Frames are handed out as `Rc<Sprite>`. Replacing an atlas with
/// [`AtlasCache::insert`] gives its frames new identities, which is how
/// holders of derived sprites notice a reload.
#[derive(Clone)]
pub struct AtlasCache(Obj<AtlasStore>);

impl Default for AtlasCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AtlasCache {
    pub fn new() -> Self {
        AtlasCache(Obj::new(AtlasStore {
            atlases: HashMap::new(),
            empty: Rc::new(Sprite::default()),
        }))
    }

    /// Adds or replaces an atlas, returning the previous one.
    pub fn insert(&self, id: AtlasId, atlas: SpriteAtlas) -> Option<SpriteAtlas> {
        self.0.get_mut().atlases.insert(id, atlas)
    }
    pub fn contains(&self, id: AtlasId) -> bool {
        self.0.get().atlases.contains_key(&id)
    }

    /// Returns the requested frame, or a shared empty sprite if the atlas or
    /// frame does not exist.
    pub fn get(&self, id: AtlasId, frame: u32) -> Rc<Sprite> {
        let store = self.0.get();
        match store.atlases.get(&id).and_then(|atlas| atlas.frame(frame)) {
            Some(sprite) => sprite.clone(),
            None => {
                log::warn!("Sprite atlas {:?} has no frame {}", id, frame);
                store.empty.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::tests::write_rgba_png;

    #[test]
    fn loads_frames_with_anchors() {
        let dir = tempfile::tempdir().unwrap();
        let mut data = Vec::new();
        for x in 0..4u8 {
            data.extend_from_slice(&[x * 60, 0, 0, 255]);
        }
        write_rgba_png(&dir.path().join("system.png"), 4, 1, &data);
        std::fs::write(
            dir.path().join("system.yaml"),
            "frames:\n  - rect: { position: [0, 0], size: [2, 1] }\n  - rect: { position: [2, 0], size: [2, 1] }\n    anchor: [3, -1]\n",
        )
        .unwrap();

        let atlas = SpriteAtlas::load_from(dir.path(), "system").unwrap();
        assert_eq!(atlas.len(), 2);
        let second = atlas.frame(1).unwrap();
        assert_eq!(second.anchor(), IVec2::new(3, -1));
        assert_eq!(second.pixel(0, 0).red, 120);
        assert_eq!(atlas.frame(0).unwrap().anchor(), IVec2::ZERO);
    }

    #[test]
    fn missing_frames_resolve_to_the_shared_empty_sprite() {
        let cache = AtlasCache::new();
        let a = cache.get(AtlasId(9), 0);
        let b = cache.get(AtlasId(9), 4);
        assert!(a.is_empty());
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn reinserting_changes_frame_identity() {
        let cache = AtlasCache::new();
        let frame = Sprite::from(Image::new(2, 2));
        cache.insert(AtlasId(1), SpriteAtlas::new(vec![frame.clone()]));
        let before = cache.get(AtlasId(1), 0);
        assert!(Rc::ptr_eq(&before, &cache.get(AtlasId(1), 0)));

        assert!(cache.insert(AtlasId(1), SpriteAtlas::new(vec![frame])).is_some());
        assert!(!Rc::ptr_eq(&before, &cache.get(AtlasId(1), 0)));
        assert!(cache.contains(AtlasId(1)));
    }
}
