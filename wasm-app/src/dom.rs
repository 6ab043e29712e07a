use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Date;
use log::error;
use pixelwar::{CellPos, Grid, PlayerRecord, ServerMessage, SessionState, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

pub const GRID_ID: &str = "table-pixel";
pub const PLAYERS_ID: &str = "players-body";
pub const WAIT_ID: &str = "time-to-wait";
pub const MESSAGE_ID: &str = "server-message";
pub const UID_INPUT_ID: &str = "input-uid";
pub const TEAM_SELECT_ID: &str = "teams";
pub const COLOR_INPUT_ID: &str = "color";
pub const CHOOSE_TEAM_ID: &str = "button-choose-team";
pub const TOGGLE_ID: &str = "toggle-visibility";
pub const TOGGLE_IMG_ID: &str = "toggle-img";

pub fn document() -> Result<Document, JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("missing window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))
}

pub fn element<T: JsCast>(doc: &Document, id: &str) -> Result<T, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
}

pub type CellHandler = Rc<dyn Fn(CellPos)>;

/// Renders into the elements of `index.html`.
pub struct DomView {
    doc: Document,
    on_cell: CellHandler,
    /// Click handlers of the cells currently on screen.
    cell_handlers: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl DomView {
    pub fn new(doc: Document, on_cell: CellHandler) -> Self {
        DomView {
            doc,
            on_cell,
            cell_handlers: RefCell::new(Vec::new()),
        }
    }

    /// Snapshot of the inputs the controller acts on.
    pub fn session(&self) -> Result<SessionState, JsValue> {
        Ok(SessionState {
            uid: element::<HtmlInputElement>(&self.doc, UID_INPUT_ID)?.value(),
            team: element::<HtmlSelectElement>(&self.doc, TEAM_SELECT_ID)?.value(),
            color: element::<HtmlInputElement>(&self.doc, COLOR_INPUT_ID)?.value(),
        })
    }

    pub fn prefill_uid(&self, uid: &str) -> Result<(), JsValue> {
        element::<HtmlInputElement>(&self.doc, UID_INPUT_ID)?.set_value(uid);
        Ok(())
    }

    /// Switches the UID field between hidden and clear text.
    pub fn toggle_uid_visibility(&self) -> Result<(), JsValue> {
        let input: HtmlInputElement = element(&self.doc, UID_INPUT_ID)?;
        let icon: Element = element(&self.doc, TOGGLE_IMG_ID)?;
        if input.type_() == "password" {
            input.set_type("text");
            icon.set_attribute("src", "img/visible.png")?;
        } else {
            input.set_type("password");
            icon.set_attribute("src", "img/hide.png")?;
        }
        Ok(())
    }

    fn try_render_grid(&self, grid: &Grid) -> Result<(), JsValue> {
        let table: Element = element(&self.doc, GRID_ID)?;
        table.set_inner_html("");
        let mut handlers = Vec::with_capacity(grid.cell_count());

        for (row, colors) in grid.rows().iter().enumerate() {
            let tr = self.doc.create_element("tr")?;
            for (col, color) in colors.iter().enumerate() {
                let td: HtmlElement = self.doc.create_element("td")?.dyn_into()?;
                td.style().set_property("background-color", color)?;

                let on_cell = Rc::clone(&self.on_cell);
                let pos = CellPos { row, col };
                let handler = Closure::wrap(Box::new(move || on_cell(pos)) as Box<dyn FnMut()>);
                td.set_onclick(Some(handler.as_ref().unchecked_ref()));
                handlers.push(handler);

                tr.append_child(&td)?;
            }
            table.append_child(&tr)?;
        }

        // The old cells are gone from the page, so their handlers can go too.
        *self.cell_handlers.borrow_mut() = handlers;
        Ok(())
    }

    fn try_render_players(&self, players: &[&PlayerRecord]) -> Result<(), JsValue> {
        let body: Element = element(&self.doc, PLAYERS_ID)?;
        body.set_inner_html("");
        for player in players {
            let row = self.doc.create_element("tr")?;
            let cells = [
                player.name.clone(),
                player.team.clone(),
                locale_timestamp(player),
                player.banned.to_string(),
                player.pixels_modified.to_string(),
            ];
            for text in &cells {
                let td = self.doc.create_element("td")?;
                td.set_text_content(Some(text));
                row.append_child(&td)?;
            }
            body.append_child(&row)?;
        }
        Ok(())
    }

    fn try_set_text(&self, id: &str, text: &str) -> Result<(), JsValue> {
        element::<Element>(&self.doc, id)?.set_text_content(Some(text));
        Ok(())
    }

    fn try_show_message(&self, message: &ServerMessage) -> Result<(), JsValue> {
        let paragraph: HtmlElement = element(&self.doc, MESSAGE_ID)?;
        paragraph.set_text_content(Some(&message.text));
        paragraph
            .style()
            .set_property("color", message.severity.color())
    }
}

fn locale_timestamp(player: &PlayerRecord) -> String {
    match player.last_modification {
        Some(at) => Date::new(&JsValue::from_f64(at.timestamp_millis() as f64))
            .to_locale_string("default", &JsValue::UNDEFINED)
            .into(),
        None => player.last_modification_label(),
    }
}

fn log_failure(what: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        error!("{what} failed: {err:?}");
    }
}

impl View for DomView {
    fn render_grid(&self, grid: &Grid) {
        log_failure("grid render", self.try_render_grid(grid));
    }

    fn render_players(&self, players: &[&PlayerRecord]) {
        log_failure("player list render", self.try_render_players(players));
    }

    fn show_wait(&self, label: &str) {
        log_failure("wait label", self.try_set_text(WAIT_ID, label));
    }

    fn show_message(&self, message: &ServerMessage) {
        log_failure("server message", self.try_show_message(message));
    }

    fn alert(&self, text: &str) {
        if let Some(window) = window() {
            log_failure("alert", window.alert_with_message(text));
        }
    }
}
