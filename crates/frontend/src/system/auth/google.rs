//! Bridge to the Google Identity Services script loaded by `index.html`.

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const POLL_MS: u32 = 100;
const LOAD_TIMEOUT_MS: u32 = 10_000;

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

/// `window.google.accounts.id`, once the script has loaded
fn accounts_id() -> Option<JsValue> {
    let window = web_sys::window()?;
    let google = get(&window, "google").ok().filter(|v| !v.is_undefined())?;
    let accounts = get(&google, "accounts").ok().filter(|v| !v.is_undefined())?;
    get(&accounts, "id").ok().filter(|v| !v.is_undefined())
}

/// Wait until the script is available; false after the timeout
pub async fn wait_for_script() -> bool {
    let mut waited = 0;
    while waited < LOAD_TIMEOUT_MS {
        if accounts_id().is_some() {
            return true;
        }
        TimeoutFuture::new(POLL_MS).await;
        waited += POLL_MS;
    }
    accounts_id().is_some()
}

/// Initialize sign-in for `client_id` and draw the button into `container`.
/// `on_credential` receives the ID token of every successful sign-in.
pub fn render_button(
    container: &web_sys::HtmlElement,
    client_id: &str,
    signup: bool,
    on_credential: impl Fn(String) + 'static,
) -> Result<(), JsValue> {
    let id = accounts_id().ok_or_else(|| JsValue::from_str("Google Sign-In is not loaded"))?;

    let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
        match get(&response, "credential").ok().and_then(|c| c.as_string()) {
            Some(credential) => on_credential(credential),
            None => log::warn!("Google sign-in response without credential"),
        }
    });

    let config = Object::new();
    Reflect::set(&config, &"client_id".into(), &client_id.into())?;
    Reflect::set(&config, &"callback".into(), callback.as_ref())?;
    let initialize: Function = get(&id, "initialize")?.dyn_into()?;
    initialize.call1(&id, &config)?;
    // The button keeps calling back for the lifetime of the page
    callback.forget();

    let options = Object::new();
    Reflect::set(&options, &"type".into(), &"standard".into())?;
    Reflect::set(&options, &"theme".into(), &"outline".into())?;
    Reflect::set(&options, &"size".into(), &"large".into())?;
    let text = if signup { "signup_with" } else { "signin_with" };
    Reflect::set(&options, &"text".into(), &text.into())?;
    Reflect::set(&options, &"shape".into(), &"rectangular".into())?;

    container.set_inner_html("");
    let render: Function = get(&id, "renderButton")?.dyn_into()?;
    render.call2(&id, container, &options)?;
    Ok(())
}
