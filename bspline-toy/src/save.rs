//! Saving and restoring the control points and parameters.
//!
//! Sessions are written as JSON from the file menu. For URLs there is a
//! compact form: a four character hex version header followed by the
//! url-safe base64 of the zlib-compressed bincode encoding.

use std::path::Path;

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use serde::{Deserialize, Serialize};

use bspline::{ControlPoints, Params};

use crate::state::ToyState;

const HEADER_LEN: usize = 4;
const CURRENT_VERSION: u16 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub points: ControlPoints,
    #[serde(default)]
    pub params: Params,
}

#[derive(Debug, Clone)]
pub enum DataError {
    InvalidHeader,
    UnexpectedVersion(u16),
    #[cfg(target_arch = "wasm32")]
    MissingWindow,
    #[cfg(target_arch = "wasm32")]
    WebError(wasm_bindgen::JsValue),
}

pub type BoxErr = Box<dyn std::error::Error>;

impl Session {
    pub fn capture(state: &ToyState) -> Session {
        Session {
            points: state.points().clone(),
            params: state.params().clone(),
        }
    }

    pub fn into_state(self) -> ToyState {
        ToyState::new(self.points, self.params)
    }

    pub fn load(path: &Path) -> Result<Session, BoxErr> {
        let bytes = std::fs::read(path)?;
        let session = Session::from_json(&bytes)?;
        log::info!(
            "loaded {} control points from {}",
            session.points.len(),
            path.display()
        );
        Ok(session)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Session, BoxErr> {
        serde_json::from_slice(bytes).map_err(Into::into)
    }

    pub fn to_json(&self) -> Result<String, BoxErr> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Decode the compact form produced by [`Session::encode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Session, BoxErr> {
        let text = std::str::from_utf8(bytes)?.trim();
        if text.len() < HEADER_LEN || !text.is_char_boundary(HEADER_LEN) {
            return Err(DataError::InvalidHeader.into());
        }
        let (header, body) = text.split_at(HEADER_LEN);
        match decode_header(header)? {
            CURRENT_VERSION => {
                let compressed = base64::decode_config(body, base64::URL_SAFE)?;
                let mut r = ZlibDecoder::new(compressed.as_slice());
                bincode::deserialize_from(&mut r).map_err(Into::into)
            }
            n => Err(DataError::UnexpectedVersion(n).into()),
        }
    }

    pub fn encode(&self) -> Result<String, BoxErr> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(128), Compression::default());
        bincode::serialize_into(&mut encoder, self)?;
        let compressed = encoder.finish()?;
        let mut out = encode_header(CURRENT_VERSION);
        out.push_str(&base64::encode_config(&compressed, base64::URL_SAFE));
        Ok(out)
    }

    #[cfg(target_arch = "wasm32")]
    pub fn init_from_current_url() -> Result<Session, BoxErr> {
        let window = web_sys::window().ok_or(DataError::MissingWindow)?;
        let anchor = window.location().hash().map_err(DataError::WebError)?;
        if anchor.is_empty() {
            Ok(Default::default())
        } else {
            Self::from_bytes(anchor.trim_start_matches('#').as_bytes())
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save_to_url(&self) {
        if let Err(e) = self.web_save_impl() {
            web_sys::console::log_1(&format!("save failed: {}", e).into());
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn web_save_impl(&self) -> Result<(), BoxErr> {
        let window = web_sys::window().ok_or(DataError::MissingWindow)?;
        let encoded = self.encode()?;
        window
            .location()
            .set_hash(&encoded)
            .map_err(DataError::WebError)?;
        Ok(())
    }
}

fn encode_header(version: u16) -> String {
    format!("{:04X}", version)
}

fn decode_header(header: &str) -> Result<u16, DataError> {
    u16::from_str_radix(header, 16).map_err(|_| DataError::InvalidHeader)
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataError::InvalidHeader => write!(f, "Invalid header"),
            DataError::UnexpectedVersion(v) => write!(f, "Unexpected version {}", v),
            #[cfg(target_arch = "wasm32")]
            DataError::MissingWindow => write!(f, "Missing window"),
            #[cfg(target_arch = "wasm32")]
            DataError::WebError(js_val) => write!(f, "Javascript error: '{:?}'", js_val),
        }
    }
}

impl std::error::Error for DataError {}
