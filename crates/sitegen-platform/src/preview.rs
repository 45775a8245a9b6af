//! Sandboxed iframe that renders the preview document over the egui canvas.
//!
//! The frame only gets `allow-scripts`: generated code runs, but it has no
//! same-origin access, cannot navigate the top window, and shares no storage
//! with the host page.

use std::cell::RefCell;
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;
use sitegen_types::{Result, SitegenError};

pub const PREVIEW_SANDBOX: &str = "allow-scripts";

pub struct IframePreview {
    frame: HtmlIFrameElement,
    /// Last document written to `srcdoc`, to avoid reloading every frame
    shown: RefCell<Option<String>>,
    bounds: RefCell<(f32, f32, f32, f32)>,
}

impl IframePreview {
    /// Create the frame and attach it (hidden) to `<body>`.
    pub fn new() -> Result<Self> {
        let document = gloo_utils::document();
        let frame: HtmlIFrameElement = document
            .create_element("iframe")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| SitegenError::JsInterop("iframe element has wrong type".to_string()))?;

        frame.set_attribute("sandbox", PREVIEW_SANDBOX).map_err(js_err)?;
        frame.set_attribute("title", "Preview").map_err(js_err)?;

        let style = frame.style();
        for (name, value) in [
            ("position", "fixed"),
            ("border", "0"),
            ("background", "#ffffff"),
            ("display", "none"),
            ("z-index", "10"),
        ] {
            style.set_property(name, value).map_err(js_err)?;
        }

        gloo_utils::body().append_child(&frame).map_err(js_err)?;

        Ok(Self {
            frame,
            shown: RefCell::new(None),
            bounds: RefCell::new((0.0, 0.0, 0.0, 0.0)),
        })
    }

    /// Show `html` unless it is already the current document.
    pub fn show_document(&self, html: &str) {
        if self.shown.borrow().as_deref() == Some(html) {
            return;
        }
        self.load(html);
    }

    /// Load `html` even if unchanged, restarting its scripts.
    pub fn reload(&self, html: &str) {
        self.load(html);
    }

    fn load(&self, html: &str) {
        self.frame.set_srcdoc(html);
        *self.shown.borrow_mut() = Some(html.to_string());
        log::debug!("Preview document loaded ({} bytes)", html.len());
    }

    /// Position the frame in CSS pixels relative to the viewport.
    pub fn set_bounds(&self, x: f32, y: f32, width: f32, height: f32) {
        let bounds = (x, y, width, height);
        if *self.bounds.borrow() == bounds {
            return;
        }
        *self.bounds.borrow_mut() = bounds;

        let style = self.frame.style();
        for (name, value) in [("left", x), ("top", y), ("width", width), ("height", height)] {
            if let Err(e) = style.set_property(name, &format!("{}px", value.max(0.0))) {
                log::warn!("Failed to set preview {}: {:?}", name, e);
            }
        }
    }

    pub fn set_visible(&self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        if let Err(e) = self.frame.style().set_property("display", display) {
            log::warn!("Failed to toggle preview: {:?}", e);
        }
    }
}

impl Drop for IframePreview {
    fn drop(&mut self) {
        self.frame.remove();
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> SitegenError {
    SitegenError::JsInterop(format!("{:?}", e))
}
