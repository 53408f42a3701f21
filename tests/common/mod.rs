#![allow(dead_code)]

use flump_rs::{AssetFetcher, FlumpError};
use image::{Rgba, RgbaImage};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory transport with per-path latency and injectable failures.
#[derive(Default)]
pub struct MemoryFetcher {
    texts: HashMap<String, String>,
    images: HashMap<String, RgbaImage>,
    delays: HashMap<String, u64>,
    failing: HashSet<String>,
    image_calls: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, path: &str, text: &str) -> Self {
        self.texts.insert(path.to_string(), text.to_string());
        self
    }

    pub fn image(mut self, path: &str, width: u32, height: u32, fill: [u8; 4]) -> Self {
        self.images
            .insert(path.to_string(), RgbaImage::from_pixel(width, height, Rgba(fill)));
        self
    }

    pub fn delay(mut self, path: &str, millis: u64) -> Self {
        self.delays.insert(path.to_string(), millis);
        self
    }

    pub fn fail(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

impl AssetFetcher for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, FlumpError> {
        self.texts
            .get(path)
            .cloned()
            .ok_or_else(|| FlumpError::fetch(path, "not found"))
    }

    async fn fetch_image(&self, path: &str) -> Result<RgbaImage, FlumpError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.get(path).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        if self.failing.contains(path) {
            return Err(FlumpError::fetch(path, "connection reset"));
        }
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| FlumpError::fetch(path, "not found"))
    }
}

/// Two atlases, two movies. `walk` has a body layer showing torso, torso,
/// head and a shadow layer showing only shadow; `idle` nests `walk`.
pub const LIBRARY_JSON: &str = r#"{
    "frameRate": 30,
    "movies": [
        {"id": "walk", "layers": [
            {"name": "body", "keyframes": [
                {"index": 0, "duration": 2, "ref": "torso"},
                {"index": 2, "duration": 2, "ref": "torso"},
                {"index": 4, "duration": 2, "ref": "head"}
            ]},
            {"name": "shadow", "keyframes": [
                {"index": 0, "duration": 3, "ref": "shadow"},
                {"index": 3, "duration": 3, "ref": "shadow"}
            ]}
        ]},
        {"id": "idle", "layers": [
            {"name": "inner", "keyframes": [{"index": 0, "duration": 10, "ref": "walk"}]}
        ]}
    ],
    "textureGroups": [
        {"scaleFactor": 1, "atlases": [
            {"file": "atlas0.png", "textures": [
                {"symbol": "torso", "rect": [0, 0, 8, 8], "origin": [4, 4]},
                {"symbol": "head", "rect": [8, 0, 8, 8], "origin": [4, 8]}
            ]},
            {"file": "atlas1.png", "textures": [
                {"symbol": "shadow", "rect": [0, 0, 16, 4], "origin": [8, 2]}
            ]}
        ]}
    ]
}"#;

pub fn library_fetcher(base: &str) -> MemoryFetcher {
    MemoryFetcher::new()
        .text(&format!("{}/library.json", base), LIBRARY_JSON)
        .image(&format!("{}/atlas0.png", base), 16, 8, [255, 0, 0, 255])
        .image(&format!("{}/atlas1.png", base), 16, 4, [0, 0, 255, 255])
}

/// A library with a single texture `a` of the given size on one atlas.
pub fn single_texture_json(width: u32, height: u32) -> String {
    format!(
        r#"{{"frameRate": 24, "textureGroups": [{{"atlases": [
            {{"file": "atlas.png", "textures": [{{"symbol": "a", "rect": [0, 0, {width}, {height}]}}]}}
        ]}}]}}"#
    )
}
