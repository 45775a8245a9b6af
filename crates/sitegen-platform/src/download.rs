//! Save bytes to the user's machine through a Blob object URL and a
//! temporary `<a download>` element.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use sitegen_types::{Result, SitegenError};

pub fn download_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<()> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: HtmlAnchorElement = gloo_utils::document()
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| SitegenError::JsInterop("anchor element has wrong type".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);

    let body = gloo_utils::body();
    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err)?;

    Url::revoke_object_url(&url).map_err(js_err)?;
    log::info!("Downloaded {} ({} bytes)", file_name, bytes.len());
    Ok(())
}

fn js_err(e: wasm_bindgen::JsValue) -> SitegenError {
    SitegenError::JsInterop(format!("{:?}", e))
}
