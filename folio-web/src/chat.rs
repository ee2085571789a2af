//! Chat widget wiring

use folio_core::chat::{normalize_input, respond, Speaker, REPLY_DELAY};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::web::{document, element_by_id, listen, remove_class, set_timeout, toggle_class};

const CONTAINER_ID: &str = "chatbot-container";
const TOGGLE_ID: &str = "chat-toggle-btn";
const CLOSE_ID: &str = "close-chat";
const INPUT_ID: &str = "chat-input";
const SEND_ID: &str = "send-btn";
const MESSAGES_ID: &str = "chat-messages";
const ACTIVE_CLASS: &str = "active";

pub fn init() -> Result<(), JsValue> {
    let container = element_by_id::<Element>(CONTAINER_ID)?;

    let toggle = element_by_id::<Element>(TOGGLE_ID)?;
    if let (Some(toggle), Some(container)) = (toggle, container.clone()) {
        listen(&toggle, "click", move |_| toggle_class(&container, ACTIVE_CLASS))?;
    }

    if let (Some(close), Some(container)) = (element_by_id::<Element>(CLOSE_ID)?, container) {
        listen(&close, "click", move |_| remove_class(&container, ACTIVE_CLASS))?;
    }

    if let Some(send) = element_by_id::<Element>(SEND_ID)? {
        listen(&send, "click", |_| submit_input())?;
    }

    if let Some(input) = element_by_id::<Element>(INPUT_ID)? {
        listen(&input, "keypress", |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if event.key() == "Enter" {
                    submit_input();
                }
            }
        })?;
    }

    Ok(())
}

fn submit_input() {
    let text = match element_by_id::<HtmlInputElement>(INPUT_ID) {
        Ok(Some(input)) => input.value(),
        Ok(None) => return,
        Err(err) => {
            log::warn!("chat input unavailable: {:?}", err);
            return;
        }
    };
    if let Some(text) = normalize_input(&text) {
        if let Err(err) = handle_user_message(text) {
            log::warn!("chat message failed: {:?}", err);
        }
    }
}

/// Show the user's message, clear the input and queue the bot's reply
pub fn handle_user_message(text: &str) -> Result<(), JsValue> {
    add_message(text, Speaker::User)?;
    if let Some(input) = element_by_id::<HtmlInputElement>(INPUT_ID)? {
        input.set_value("");
    }

    let reply = respond(text);
    set_timeout(
        move || {
            if let Err(err) = add_message(reply, Speaker::Bot) {
                log::warn!("chat reply failed: {:?}", err);
            }
        },
        REPLY_DELAY,
    )
}

fn add_message(text: &str, speaker: Speaker) -> Result<(), JsValue> {
    let Some(messages) = element_by_id::<Element>(MESSAGES_ID)? else {
        return Ok(());
    };

    let bubble = document()?
        .create_element("div")?
        .dyn_into::<HtmlElement>()?;
    bubble.set_class_name(&format!("message {}", speaker.css_class()));
    bubble.set_inner_text(text);
    messages.append_child(&bubble)?;
    messages.set_scroll_top(messages.scroll_height());
    Ok(())
}
