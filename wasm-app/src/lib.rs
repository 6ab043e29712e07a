use std::rc::{Rc, Weak};

use log::{error, LevelFilter};
use pixelwar::{CellPos, Controller, Uid};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlButtonElement;

pub mod dom;
pub mod http;
pub mod logger;
pub mod poller;
pub mod storage;

use dom::{document, element, DomView, CHOOSE_TEAM_ID, TOGGLE_ID};
use http::{load_config, HttpGateway};
use poller::IntervalPoller;
use storage::BrowserIdentityStore;

type PixelApp = Controller<HttpGateway, DomView, BrowserIdentityStore, IntervalPoller>;

fn on_cell(app: &Weak<PixelApp>, pos: CellPos) {
    let Some(app) = app.upgrade() else {
        return;
    };
    match app.view().session() {
        Ok(session) => spawn_local(async move { app.activate_cell(&session, pos).await }),
        Err(err) => error!("cannot read inputs: {err:?}"),
    }
}

fn on_tick(app: &Weak<PixelApp>, uid: Uid) {
    if let Some(app) = app.upgrade() {
        spawn_local(async move { app.poll_wait_time(&uid).await });
    }
}

fn button(id: &str, handler: impl Fn() -> Result<(), JsValue> + 'static) -> Result<(), JsValue> {
    let doc = document()?;
    let button: HtmlButtonElement = element(&doc, id)?;
    let closure = Closure::wrap(Box::new(move || {
        if let Err(err) = handler() {
            error!("{err:?}");
        }
    }) as Box<dyn FnMut()>);
    button.set_onclick(Some(closure.as_ref().unchecked_ref()));
    closure.forget();
    Ok(())
}

async fn init_app() -> Result<(), JsValue> {
    let config = load_config().await;
    let doc = document()?;

    let app: Rc<PixelApp> = Rc::new_cyclic(|weak: &Weak<PixelApp>| {
        let cell_app = weak.clone();
        let tick_app = weak.clone();
        Controller::new(
            HttpGateway::new(config.clone()),
            DomView::new(doc, Rc::new(move |pos: CellPos| on_cell(&cell_app, pos))),
            BrowserIdentityStore::new(config.storage_key.clone()),
            IntervalPoller::new(
                config.poll_interval_ms,
                Rc::new(move |uid: Uid| on_tick(&tick_app, uid)),
            ),
        )
    });

    if let Some(uid) = app.restore_identity() {
        app.view().prefill_uid(&uid)?;
    }

    let team_app = Rc::clone(&app);
    button(CHOOSE_TEAM_ID, move || {
        let session = team_app.view().session()?;
        let app = Rc::clone(&team_app);
        spawn_local(async move { app.choose_team(&session).await });
        Ok(())
    })?;

    let toggle_app = Rc::clone(&app);
    button(TOGGLE_ID, move || toggle_app.view().toggle_uid_visibility())?;

    app.start().await;
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);
    spawn_local(async {
        if let Err(err) = init_app().await {
            error!("startup failed: {err:?}");
        }
    });
}
