use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use eframe::egui;
use tokio::sync::Semaphore;

use crate::icon::placeholder_image;
use showdeck_core::PLACEHOLDER_ASSET;

const MIN_TEXTURE_CACHE: usize = 64;

struct Decoded {
    url: String,
    image: Result<egui::ColorImage, String>,
}

/// Fetches poster and still images in the background and keeps their textures
/// in memory, oldest upload evicted first once the cache is full. Nothing is
/// written to disk.
pub struct ImageManager {
    textures: HashMap<String, egui::TextureHandle>,
    upload_order: VecDeque<String>,
    cache_limit: usize,
    loading: HashSet<String>,
    failed: HashSet<String>,
    placeholder: Option<egui::TextureHandle>,
    http: reqwest::Client,
    load_semaphore: Arc<Semaphore>,
    tx: Sender<Decoded>,
    rx: Receiver<Decoded>,
}

impl ImageManager {
    pub fn new(concurrent_loads: usize, cache_limit: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            textures: HashMap::new(),
            upload_order: VecDeque::new(),
            cache_limit: cache_limit.max(MIN_TEXTURE_CACHE),
            loading: HashSet::new(),
            failed: HashSet::new(),
            placeholder: None,
            http: reqwest::Client::new(),
            load_semaphore: Arc::new(Semaphore::new(concurrent_loads.max(1))),
            tx,
            rx,
        }
    }

    pub fn placeholder(&mut self, ctx: &egui::Context) -> egui::TextureHandle {
        self.placeholder
            .get_or_insert_with(|| {
                ctx.load_texture(PLACEHOLDER_ASSET, placeholder_image(120, 180), egui::TextureOptions::LINEAR)
            })
            .clone()
    }

    /// Texture for `url` if it has arrived; otherwise starts loading it.
    pub fn texture(&mut self, ctx: &egui::Context, url: &str) -> Option<egui::TextureHandle> {
        if let Some(tex) = self.textures.get(url) {
            return Some(tex.clone());
        }
        if !self.loading.contains(url) && !self.failed.contains(url) {
            self.start_loading(ctx, url.to_string());
        }
        None
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    fn start_loading(&mut self, ctx: &egui::Context, url: String) {
        self.loading.insert(url.clone());
        let http = self.http.clone();
        let semaphore = self.load_semaphore.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            let image = fetch_image(&http, &url).await;
            if tx.send(Decoded { url, image }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Uploads finished downloads as textures. Call once per frame.
    pub fn poll(&mut self, ctx: &egui::Context) {
        while let Ok(done) = self.rx.try_recv() {
            self.loading.remove(&done.url);
            match done.image {
                Ok(image) => {
                    let tex = ctx.load_texture(done.url.clone(), image, egui::TextureOptions::LINEAR);
                    self.upload_order.push_back(done.url.clone());
                    self.textures.insert(done.url, tex);
                }
                Err(e) => {
                    log::warn!("Failed to load image {}: {}", done.url, e);
                    self.failed.insert(done.url);
                }
            }
        }
        let evicted = evict_oldest(&mut self.textures, &mut self.upload_order, self.cache_limit);
        if evicted > 0 {
            log::debug!("evicted {} textures (limit {})", evicted, self.cache_limit);
        }
    }
}

/// Drops the oldest entries until at most `limit` remain. Returns how many went.
fn evict_oldest<K: Hash + Eq, V>(map: &mut HashMap<K, V>, order: &mut VecDeque<K>, limit: usize) -> usize {
    let mut evicted = 0;
    while map.len() > limit {
        let Some(key) = order.pop_front() else {
            break;
        };
        if map.remove(&key).is_some() {
            evicted += 1;
        }
    }
    evicted
}

async fn fetch_image(http: &reqwest::Client, url: &str) -> Result<egui::ColorImage, String> {
    let response = http.get(url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP error: {}", response.status()));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    decode_image(&bytes)
}

pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, String> {
    let decoded = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png() {
        let mut png = Vec::new();
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.size, [3, 2]);
        assert_eq!(decoded.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_evict_oldest_keeps_newest_entries() {
        let mut map = HashMap::new();
        let mut order = VecDeque::new();
        for i in 0..5u32 {
            map.insert(format!("u{}", i), i);
            order.push_back(format!("u{}", i));
        }
        assert_eq!(evict_oldest(&mut map, &mut order, 3), 2);
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("u0"));
        assert!(!map.contains_key("u1"));
        assert!(map.contains_key("u4"));
        assert_eq!(evict_oldest(&mut map, &mut order, 3), 0);
    }

    #[test]
    fn test_cache_limit_has_a_floor() {
        let images = ImageManager::new(2, 1);
        assert_eq!(images.cache_limit, MIN_TEXTURE_CACHE);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image(b"not an image").is_err());
    }
}
