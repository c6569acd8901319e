//! WebAssembly bindings for the board randomizer.
//!
//! This module exposes the generator to JavaScript through wasm-bindgen.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::generator::BoardGenerator;
#[cfg(feature = "wasm")]
use crate::settings::Settings;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed randomizer holding the precomputed board topology
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmRandomizer {
    generator: BoardGenerator,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmRandomizer {
    /// Build the standard board topology
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmRandomizer {
        WasmRandomizer {
            generator: BoardGenerator::standard(),
        }
    }

    /// Default settings as JSON
    #[wasm_bindgen(js_name = defaultSettings)]
    pub fn default_settings(&self) -> String {
        serde_json::to_string(&Settings::default()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Clamp a settings document to what the board can satisfy
    #[wasm_bindgen(js_name = clampSettings)]
    pub fn clamp_settings(&self, settings_json: &str) -> Result<String, JsValue> {
        let settings = Settings::from_json(settings_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let clamped = settings.clamped(self.generator.land_count());
        serde_json::to_string(&clamped).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Generate a board from a settings document, returns the board JSON
    #[wasm_bindgen(js_name = generate)]
    pub fn generate(&self, settings_json: &str) -> Result<String, JsValue> {
        let settings = Settings::from_json(settings_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
        settings
            .validate(self.generator.land_count())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let board = self.generator.generate(&settings);
        serde_json::to_string(&board).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmRandomizer {
    fn default() -> Self {
        Self::new()
    }
}
