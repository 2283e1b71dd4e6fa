// src/services/sprite_cache.rs
//
// Decoded GIF frames keyed by image name. Every draw of an animated image
// shows its current frame and advances the cursor by one.

use nannou::image::codecs::gif::GifDecoder;
use nannou::image::{AnimationDecoder, ImageResult, RgbaImage};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::utilities::is_gif;

#[derive(Debug)]
struct GifFrames {
    frames: Vec<RgbaImage>,
    current: usize,
}

#[derive(Debug)]
enum SpriteEntry {
    Animated(GifFrames),
    // decode failed, drawn as a still from now on
    Failed,
}

#[derive(Debug)]
pub struct SpriteCache {
    avatar_dir: PathBuf,
    entries: HashMap<String, SpriteEntry>,
}

impl SpriteCache {
    pub fn new(avatar_dir: impl Into<PathBuf>) -> Self {
        Self {
            avatar_dir: avatar_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// Decodes every GIF in `names` that has not been seen before.
    /// New files are decoded in parallel. Returns the number decoded successfully.
    pub fn preload<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> usize {
        let mut pending: Vec<&str> = names
            .into_iter()
            .filter(|name| is_gif(name) && !self.entries.contains_key(*name))
            .collect();
        pending.sort_unstable();
        pending.dedup();

        if pending.is_empty() {
            return 0;
        }

        let decoded: Vec<(&str, ImageResult<Vec<RgbaImage>>)> = pending
            .par_iter()
            .map(|name| (*name, decode_gif(&self.avatar_dir.join(name))))
            .collect();

        let mut loaded = 0;
        for (name, result) in decoded {
            match result {
                Ok(frames) if !frames.is_empty() => {
                    tracing::debug!(image = name, frames = frames.len(), "decoded gif");
                    self.insert_frames(name, frames);
                    loaded += 1;
                }
                Ok(_) => {
                    tracing::warn!(image = name, "gif has no frames, drawing as still");
                    self.entries.insert(name.to_string(), SpriteEntry::Failed);
                }
                Err(e) => {
                    tracing::warn!(image = name, error = %e, "failed to decode gif, drawing as still");
                    self.entries.insert(name.to_string(), SpriteEntry::Failed);
                }
            }
        }
        loaded
    }

    /// Stores already decoded frames for `name`, resetting its cursor.
    pub fn insert_frames(&mut self, name: &str, frames: Vec<RgbaImage>) {
        let entry = if frames.is_empty() {
            SpriteEntry::Failed
        } else {
            SpriteEntry::Animated(GifFrames { frames, current: 0 })
        };
        self.entries.insert(name.to_string(), entry);
    }

    /// The frame to draw now for `name`, or `None` when it is not an
    /// animated image. Advances the cursor, wrapping after the last frame.
    pub fn next_frame(&mut self, name: &str) -> Option<(usize, &RgbaImage)> {
        match self.entries.get_mut(name)? {
            SpriteEntry::Animated(gif) => {
                let index = gif.current;
                gif.current = (gif.current + 1) % gif.frames.len();
                Some((index, &gif.frames[index]))
            }
            SpriteEntry::Failed => None,
        }
    }

    pub fn frame_count(&self, name: &str) -> Option<usize> {
        match self.entries.get(name)? {
            SpriteEntry::Animated(gif) => Some(gif.frames.len()),
            SpriteEntry::Failed => None,
        }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

fn decode_gif(path: &Path) -> ImageResult<Vec<RgbaImage>> {
    let file = File::open(path)?;
    let decoder = GifDecoder::new(BufReader::new(file))?;
    let frames = decoder.into_frames().collect_frames()?;
    Ok(frames.into_iter().map(|frame| frame.into_buffer()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: u8) -> Vec<RgbaImage> {
        (0..n)
            .map(|i| RgbaImage::from_pixel(2, 2, nannou::image::Rgba([i, i, i, 255])))
            .collect()
    }

    #[test]
    fn test_cursor_advances_and_wraps() {
        let mut cache = SpriteCache::new("unused");
        cache.insert_frames("walker.gif", frames(3));

        let seen: Vec<usize> = (0..7)
            .map(|_| cache.next_frame("walker.gif").unwrap().0)
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_frame_pixels_follow_cursor() {
        let mut cache = SpriteCache::new("unused");
        cache.insert_frames("walker.gif", frames(2));
        assert_eq!(cache.next_frame("walker.gif").unwrap().1.get_pixel(0, 0)[0], 0);
        assert_eq!(cache.next_frame("walker.gif").unwrap().1.get_pixel(0, 0)[0], 1);
    }

    #[test]
    fn test_unknown_and_empty_images() {
        let mut cache = SpriteCache::new("unused");
        assert!(cache.next_frame("nothing.gif").is_none());

        cache.insert_frames("empty.gif", Vec::new());
        assert!(cache.is_known("empty.gif"));
        assert!(cache.next_frame("empty.gif").is_none());
        assert_eq!(cache.frame_count("empty.gif"), None);
    }

    #[test]
    fn test_failed_decode_is_remembered() {
        let dir = std::env::temp_dir().join("tilevis_sprite_cache_missing");
        let mut cache = SpriteCache::new(&dir);

        assert_eq!(cache.preload(["ghost.gif", "still.png", "ghost.gif"]), 0);
        assert!(cache.is_known("ghost.gif"));
        assert!(!cache.is_known("still.png"));
        assert!(cache.next_frame("ghost.gif").is_none());
    }

    fn write_gif(path: &Path, frames: Vec<RgbaImage>) {
        use nannou::image::codecs::gif::GifEncoder;
        use nannou::image::Frame;

        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames.into_iter().map(Frame::new))
            .unwrap();
    }

    #[test]
    fn test_preload_decodes_gif_files() {
        let dir = std::env::temp_dir().join("tilevis_sprite_cache_decode");
        std::fs::create_dir_all(&dir).unwrap();
        write_gif(&dir.join("walker.gif"), frames(3));
        write_gif(&dir.join("robot.gif"), frames(2));

        let mut cache = SpriteCache::new(&dir);
        assert_eq!(cache.preload(["walker.gif", "robot.gif", "walker.gif"]), 2);
        assert_eq!(cache.frame_count("walker.gif"), Some(3));
        assert_eq!(cache.frame_count("robot.gif"), Some(2));

        let (index, pixels) = cache.next_frame("walker.gif").unwrap();
        assert_eq!(index, 0);
        assert_eq!(pixels.dimensions(), (2, 2));
        assert_eq!(cache.next_frame("walker.gif").unwrap().0, 1);

        // already decoded, nothing new to load
        assert_eq!(cache.preload(["walker.gif"]), 0);
    }

    #[test]
    fn test_preload_skips_cached_names() {
        let mut cache = SpriteCache::new("unused");
        cache.insert_frames("walker.gif", frames(4));
        assert_eq!(cache.preload(["walker.gif"]), 0);
        assert_eq!(cache.frame_count("walker.gif"), Some(4));
    }
}
