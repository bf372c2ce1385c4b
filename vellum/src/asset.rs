use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::File,
    io::Error as IoError,
    path::{Path, PathBuf},
};

use crate::two::{Image, Pixel};

pub type BufReader = std::io::BufReader<File>;
pub type BufWriter = std::io::BufWriter<File>;

// Debug: expect working dir to be cargo project, so look for assets relative to that
#[cfg(debug_assertions)]
pub fn base_path() -> PathBuf {
    PathBuf::new()
}

// Release: always look for assets relative to the executable
#[cfg(not(debug_assertions))]
pub fn base_path() -> PathBuf {
    std::env::current_exe()
        .map(|mut dir| {
            dir.pop();
            dir
        })
        .unwrap_or_default()
}

#[derive(Debug)]
enum ErrorKind {
    IoError(IoError),
    Format,
    Other,
}

pub struct AssetError {
    path: PathBuf,
    write: bool,
    kind: ErrorKind,
    info: String,
}

impl AssetError {
    fn new_io(path: PathBuf, write: bool, error: IoError) -> Self {
        AssetError {
            path,
            write,
            kind: ErrorKind::IoError(error),
            info: String::new(),
        }
    }
    fn new_yaml(path: PathBuf, write: bool, error: serde_yml::Error) -> Self {
        AssetError {
            path,
            write,
            kind: ErrorKind::Format,
            info: error.to_string(),
        }
    }
    fn new_format(path: PathBuf, info: String) -> Self {
        AssetError {
            path,
            write: false,
            kind: ErrorKind::Format,
            info,
        }
    }
    fn new_png(path: PathBuf, error: png::DecodingError) -> Self {
        match error {
            png::DecodingError::IoError(error) => Self::new_io(path, false, error),
            png::DecodingError::Format(error) => Self::new_format(path, error.to_string()),
            _ => AssetError {
                path,
                write: false,
                kind: ErrorKind::Other,
                info: error.to_string(),
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
    pub fn not_found(&self) -> bool {
        if let ErrorKind::IoError(error) = &self.kind {
            error.kind() == std::io::ErrorKind::NotFound
        } else {
            false
        }
    }
    pub fn is_format(&self) -> bool {
        matches!(self.kind, ErrorKind::Format)
    }
}

impl std::fmt::Debug for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let read_write = if self.write { "writing" } else { "reading" };
        write!(f, "Error {} {}: ", read_write, self.path.to_string_lossy())?;
        match &self.kind {
            ErrorKind::IoError(error) if self.write && error.kind() == std::io::ErrorKind::NotFound => {
                // When a NotFound error occurs while writing, it means a parent directory doesn't exist.
                write!(f, "The parent directory does not exist.")?;
                if let Some(code) = error.raw_os_error() {
                    write!(f, " (os error {code})")?;
                }
                Ok(())
            }
            ErrorKind::IoError(error) => write!(f, "{}", error),
            ErrorKind::Format | ErrorKind::Other => write!(f, "{}", self.info),
        }
    }
}
impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self, f)
    }
}

impl std::error::Error for AssetError {}

pub type Result<T> = std::result::Result<T, AssetError>;

pub fn get_path(prefix: &str, asset_path: &str) -> PathBuf {
    let mut file_path = base_path();
    file_path.push(prefix);
    file_path.push(asset_path);
    file_path
}
pub fn open_reader(path: &Path) -> Result<BufReader> {
    log::debug!("Reading {}", path.to_string_lossy());
    let file = File::open(path).map_err(|e| AssetError::new_io(path.to_owned(), false, e))?;
    Ok(BufReader::new(file))
}
pub fn open_writer(path: &Path) -> Result<BufWriter> {
    log::debug!("Writing {}", path.to_string_lossy());
    let file = File::create(path).map_err(|e| AssetError::new_io(path.to_owned(), true, e))?;
    Ok(BufWriter::new(file))
}

pub fn create_dir(dir: &str) -> Result<()> {
    let mut dir_path = base_path();
    dir_path.push(dir);
    if !dir_path.exists() {
        log::info!("Creating directory {}", dir_path.to_string_lossy());
        std::fs::create_dir_all(&dir_path).map_err(|e| AssetError::new_io(dir_path, true, e))?;
    }
    Ok(())
}

pub fn read_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let reader = open_reader(path)?;
    serde_yml::from_reader(reader).map_err(|e| AssetError::new_yaml(path.to_owned(), false, e))
}
pub fn write_yaml<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize,
{
    let writer = open_writer(path)?;
    serde_yml::to_writer(writer, value).map_err(|e| AssetError::new_yaml(path.to_owned(), true, e))
}

pub fn load_yaml_file<T>(prefix: &str, file: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    read_yaml(&get_path(prefix, file))
}
pub fn load_yaml_file_or_default<T>(prefix: &str, file: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let path = get_path(prefix, file);
    if path.exists() {
        read_yaml(&path)
    } else {
        log::info!(
            "{} does not exist, using defaults instead",
            path.to_string_lossy()
        );
        Ok(Default::default())
    }
}
pub fn save_yaml_file<T>(prefix: &str, file: &str, value: &T) -> Result<()>
where
    T: Serialize,
{
    write_yaml(&get_path(prefix, file), value)
}

/// Decodes a PNG into an RGBA [`Image`], expanding palette, grey and 16-bit
/// formats on the way.
pub fn read_png(path: &Path) -> Result<Image> {
    let reader = open_reader(path)?;
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut image_reader = decoder
        .read_info()
        .map_err(|e| AssetError::new_png(path.to_owned(), e))?;
    let mut buffer = vec![0; image_reader.output_buffer_size()];
    let info = image_reader
        .next_frame(&mut buffer)
        .map_err(|e| AssetError::new_png(path.to_owned(), e))?;
    buffer.truncate(info.buffer_size());

    let pixels: Vec<Pixel> = match info.color_type {
        png::ColorType::Rgba => buffer
            .chunks_exact(4)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
            .collect(),
        png::ColorType::Rgb => buffer
            .chunks_exact(3)
            .map(|c| Pixel::new(c[0], c[1], c[2], 255))
            .collect(),
        png::ColorType::GrayscaleAlpha => buffer
            .chunks_exact(2)
            .map(|c| Pixel::new(c[0], c[0], c[0], c[1]))
            .collect(),
        png::ColorType::Grayscale => buffer
            .iter()
            .map(|&v| Pixel::new(v, v, v, 255))
            .collect(),
        png::ColorType::Indexed => {
            return Err(AssetError::new_format(
                path.to_owned(),
                "indexed PNG was not expanded".to_string(),
            ))
        }
    };
    let width = i32::try_from(info.width);
    let height = i32::try_from(info.height);
    match (width, height) {
        (Ok(width), Ok(height)) => Image::from_pixels(width, height, pixels).ok_or_else(|| {
            AssetError::new_format(path.to_owned(), "pixel data does not match size".to_string())
        }),
        _ => Err(AssetError::new_format(
            path.to_owned(),
            format!("image too large ({}x{})", info.width, info.height),
        )),
    }
}
