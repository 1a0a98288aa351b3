//! Login screen demo
//!
//! Run with:
//! `RUST_LOG=debug cargo run -p bindui_widgets --example login_screen`
//!
//! Walks one screen through its lifecycle: extras read from the opening
//! intent, a lazily inflated binding, markup rendered into the title, a
//! submit button that follows form validity, and a debounced pay button.

use std::cell::Cell;
use std::rc::Rc;

use bindui_core::{Color, MonotonicClock, SharedDebounceGuard};
use bindui_platform::{init_logging, BinduiConfig, Intent, Payload, Platform};
use bindui_widgets::{
    debounced, set_interactive, view_binding, ClickHandler, InflateError, LayoutId,
    LayoutRegistry, ScreenBinding, ScreenEvent, View, ViewTree,
};

const LOGIN_LAYOUT: LayoutId = LayoutId(1);

struct LoginBinding {
    title: View,
    submit: View,
    pay: View,
}

impl LoginBinding {
    fn bind(tree: &ViewTree) -> Result<Self, InflateError> {
        Ok(Self {
            title: tree.require("title")?,
            submit: tree.require("submit")?,
            pay: tree.require("pay")?,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("info")?;

    let config = BinduiConfig::from_toml_str("[debounce]\nmin_interval_ms = 300\n")?;
    let platform = Platform::init(Platform::from_config(&config))?;

    let intent = Intent::new("login").with_extras(
        Payload::new()
            .with("user", String::from("ada"))
            .with("greeting", String::from("<b>Welcome back</b>, <i>ada</i>!")),
    );

    let mut layouts = LayoutRegistry::new();
    layouts.register(LOGIN_LAYOUT, ["root", "title", "submit", "pay"]);

    let mut screen = ScreenBinding::new(view_binding(
        Rc::new(layouts),
        LOGIN_LAYOUT,
        LoginBinding::bind,
    ));
    screen.on_event(ScreenEvent::Created);
    let binding = screen.get()?;

    let greeting: String = intent
        .get_extra(platform.payload(), "greeting")
        .unwrap_or_default();
    let title = platform.convert_markup(&greeting);
    tracing::info!(view = binding.title.name(), text = %title, spans = title.spans().len(), "title set");

    let submitted = Rc::new(Cell::new(0u32));
    let on_submit = {
        let submitted = submitted.clone();
        ClickHandler::new(move |view: &View| {
            submitted.set(submitted.get() + 1);
            tracing::info!(view = view.name(), "form submitted");
        })
    };
    let user: Option<String> = intent.get_extra(platform.payload(), "user");
    for password in ["", "hunter2"] {
        let valid = user.is_some() && !password.is_empty();
        set_interactive(&binding.submit, valid, on_submit.clone(), Color::BLUE, Color::GRAY);
        binding.submit.perform_click();
    }

    let paid = Rc::new(Cell::new(0u32));
    let on_pay = {
        let paid = paid.clone();
        ClickHandler::new(move |_| paid.set(paid.get() + 1))
    };
    let guard = SharedDebounceGuard::new(platform.debounce_guard());
    set_interactive(
        &binding.pay,
        true,
        debounced(on_pay, guard, MonotonicClock::new()),
        Color::GREEN,
        Color::GRAY,
    );
    for _ in 0..5 {
        binding.pay.perform_click();
    }

    tracing::info!(submitted = submitted.get(), paid = paid.get(), "clicks handled");

    screen.on_event(ScreenEvent::Destroyed);
    tracing::info!(released = screen.is_released(), "screen destroyed");
    Ok(())
}
