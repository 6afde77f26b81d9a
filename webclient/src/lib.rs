use seed::{prelude::*, *};

mod api;
pub mod avatar;
mod home;
mod pages;
mod register;
mod session;

use pages::Page;
use session::Session;

struct Model {
    session: Session,
    page: Page,
    register: register::Model,
    // Present only while the home page is shown.
    home: Option<home::Model>,
}

enum Msg {
    UrlRequested(subs::UrlRequested),
    UrlChanged(subs::UrlChanged),
    Register(register::Msg),
    Home(home::Msg),
}

fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders
        .subscribe(Msg::UrlRequested)
        .subscribe(Msg::UrlChanged);

    let session = Session::load();
    match session.user() {
        Some(user) => log::info!("Restored session for {}", user.name),
        None => log::info!("No session, showing registration"),
    }

    let mut model = Model {
        session,
        page: Page::NotFound,
        register: register::Model::default(),
        home: None,
    };
    route(&mut model, Page::from_url(url), orders);
    model
}

/// Switches to `page`, dropping the home model when leaving home. Returns
/// true when a fresh home model has to be mounted.
fn switch_page(model: &mut Model, page: Page) -> bool {
    model.page = page;

    match page {
        Page::Home => model.home.is_none(),
        Page::NotFound => {
            model.home = None;
            false
        }
    }
}

fn route(model: &mut Model, page: Page, orders: &mut impl Orders<Msg>) {
    if switch_page(model, page) {
        model.home = Some(home::init(&mut orders.proxy(Msg::Home)));
    }
}

/// Hands `msg` to the mounted home model. Responses that arrive after the
/// home page was left are dropped.
fn mounted_home(home: &mut Option<home::Model>, msg: home::Msg) -> Option<(&mut home::Model, home::Msg)> {
    match home {
        Some(home) => Some((home, msg)),
        None => {
            log::debug!("Ignoring {:?}, home page is not mounted", msg);
            None
        }
    }
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::UrlRequested(subs::UrlRequested(url, request)) => {
            if Page::is_served_elsewhere(&url) {
                request.handled();
                url.go_and_load();
            }
        }
        Msg::UrlChanged(subs::UrlChanged(url)) => route(model, Page::from_url(url), orders),
        Msg::Register(msg) => register::update(
            msg,
            &mut model.register,
            &mut model.session,
            &mut orders.proxy(Msg::Register),
        ),
        Msg::Home(msg) => {
            if let Some((home, msg)) = mounted_home(&mut model.home, msg) {
                home::update(msg, home, &mut model.session, &mut orders.proxy(Msg::Home));
            }
        }
    }
}

fn page_view(model: &Model) -> Node<Msg> {
    match (&model.page, &model.home) {
        (Page::Home, Some(home)) => home::view(home, &model.session).map_msg(Msg::Home),
        _ => div![
            C!["page-not-found"],
            h2!["Nothing here"],
            a![attrs! {At::Href => Page::Home.href()}, "Back home"],
        ],
    }
}

fn view(model: &Model) -> Vec<Node<Msg>> {
    vec![
        page_view(model),
        register::view(&model.register, &model.session).map_msg(Msg::Register),
    ]
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug).expect("error initializing logger");

    App::start("app", init, update, view);
}
