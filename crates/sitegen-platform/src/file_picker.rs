//! Native file dialog via a hidden `<input type="file">`.
//!
//! The dialog result arrives on a DOM event; a oneshot channel turns that
//! callback into a future the UI can await from `spawn_local`.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use sitegen_types::{Result, SitegenError, message::ChatFile};

/// Let the user choose files and read them as base64 attachments.
///
/// Resolves to an empty list if the dialog is dismissed.
pub async fn pick_files(accept: &str) -> Result<Vec<ChatFile>> {
    let input: HtmlInputElement = gloo_utils::document()
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| SitegenError::JsInterop("input element has wrong type".to_string()))?;
    input.set_type("file");
    input.set_multiple(true);
    if !accept.is_empty() {
        input.set_accept(accept);
    }

    let (sender, receiver) = oneshot::channel::<()>();
    let sender = Rc::new(RefCell::new(Some(sender)));

    // `change` fires on selection, `cancel` when the dialog is dismissed.
    let mut listeners = Vec::new();
    for event in ["change", "cancel"] {
        let sender = sender.clone();
        let on_event = Closure::once(move |_: web_sys::Event| {
            if let Some(tx) = sender.borrow_mut().take() {
                let _ = tx.send(());
            }
        });
        input
            .add_event_listener_with_callback(event, on_event.as_ref().unchecked_ref())
            .map_err(js_err)?;
        listeners.push(on_event);
    }

    input.click();
    receiver
        .await
        .map_err(|_| SitegenError::JsInterop("File dialog channel closed".to_string()))?;
    drop(listeners);

    let Some(list) = input.files() else {
        return Ok(Vec::new());
    };

    let mut files = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(file) = list.get(i) {
            files.push(read_file(&file).await?);
        }
    }
    log::info!("Attached {} file(s)", files.len());
    Ok(files)
}

async fn read_file(file: &File) -> Result<ChatFile> {
    let buffer = JsFuture::from(file.array_buffer()).await.map_err(js_err)?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    let mime_type = match file.type_() {
        t if t.is_empty() => "application/octet-stream".to_string(),
        t => t,
    };
    Ok(ChatFile::from_bytes(file.name(), mime_type, &bytes))
}

fn js_err(e: JsValue) -> SitegenError {
    SitegenError::JsInterop(format!("{:?}", e))
}
