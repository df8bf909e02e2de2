//! Browser delivery of the export: a `Blob` URL clicked through a hidden
//! anchor with the `download` attribute set.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;

use crate::export_error::ExportError;

fn js_err(context: &str) -> impl Fn(wasm_bindgen::JsValue) -> ExportError + '_ {
    move |e| ExportError::Download(format!("{context}: {e:?}"))
}

/// Offers `csv_text` to the user as a file called `file_name`.
pub fn trigger_download(csv_text: &str, file_name: &str) -> Result<(), ExportError> {
    let window =
        web_sys::window().ok_or_else(|| ExportError::Download("window not available".into()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Download("document not available".into()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("document has no body".into()))?;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(csv_text));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8;");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(js_err("Blob::new"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(js_err("URL.createObjectURL"))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err("createElement"))?
        .dyn_into()
        .map_err(|_| ExportError::Download("created element is not an anchor".into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor
        .style()
        .set_property("visibility", "hidden")
        .map_err(js_err("style"))?;

    body.append_child(&anchor).map_err(js_err("appendChild"))?;
    anchor.click();
    body.remove_child(&anchor).map_err(js_err("removeChild"))?;
    web_sys::Url::revoke_object_url(&url).map_err(js_err("URL.revokeObjectURL"))?;

    Ok(())
}
