use seed::{prelude::*, *};
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use shared::lib::User;

use crate::api::ApiError;
use crate::avatar::{self, Avatar, AvatarError};
use crate::session::{self, Session};

const REGISTER_FAILED: &str = "Failed to register. Please try again.";

#[derive(Default)]
pub struct Model {
    name: String,
    email: String,
    /// Accepted photo as a data URI. Doubles as the preview source.
    avatar: Option<String>,
    loading: bool,
    error: Option<String>,
    upload_seq: u32,
    file_input: ElRef<HtmlInputElement>,
}

impl Model {
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    // Any decode still in flight is stale from here on.
    fn supersede_uploads(&mut self) -> u32 {
        self.upload_seq = self.upload_seq.wrapping_add(1);
        self.upload_seq
    }

    /// Runs the pre-read checks for a newly selected file. Returns the
    /// sequence number the decode result must carry to be applied.
    fn start_upload(&mut self, size: u64, mime_type: &str) -> Option<u32> {
        let seq = self.supersede_uploads();

        if let Err(e) = avatar::check_file(size, mime_type) {
            self.error = Some(e.to_string());
            return None;
        }

        Some(seq)
    }

    /// Applies a decoded photo unless a later selection superseded it.
    fn finish_upload(&mut self, seq: u32, loaded: Result<Avatar, AvatarError>) {
        if seq != self.upload_seq {
            log::debug!("Dropping stale avatar upload #{} (latest #{})", seq, self.upload_seq);
            return;
        }

        match loaded.and_then(|x| avatar::check_square(x.dimensions).map(|_| x)) {
            Ok(photo) => {
                self.avatar = Some(photo.data_url);
                self.error = None;
            }
            Err(e) => {
                if let AvatarError::Read(cause) | AvatarError::Decode(cause) = &e {
                    log::error!("Avatar upload failed: {}", cause);
                }

                self.avatar = None;
                self.error = Some(e.to_string());
            }
        }
    }

    fn remove_photo(&mut self) {
        self.supersede_uploads();
        self.avatar = None;

        if let Some(input) = self.file_input.get() {
            input.set_value("");
        }
    }
}

#[derive(Debug)]
pub enum Msg {
    NameChanged(String),
    EmailChanged(String),
    ChoosePhoto,
    PhotoSelected(Option<web_sys::File>),
    PhotoLoaded(u32, Result<Avatar, AvatarError>),
    RemovePhoto,
    Submit,
    Registered(Result<User, ApiError>),
}

pub fn is_visible(session: &Session) -> bool {
    session.user().is_none()
}

pub fn update(msg: Msg, model: &mut Model, session: &mut Session, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::NameChanged(name) => model.name = name,
        Msg::EmailChanged(email) => model.email = email,
        Msg::ChoosePhoto => {
            if let Some(input) = model.file_input.get() {
                input.click();
            }
        }
        Msg::PhotoSelected(None) => {}
        Msg::PhotoSelected(Some(file)) => {
            if let Some(seq) = model.start_upload(file.size() as u64, &file.type_()) {
                orders.perform_cmd(async move { Msg::PhotoLoaded(seq, avatar::load(file).await) });
            }
        }
        Msg::PhotoLoaded(seq, loaded) => model.finish_upload(seq, loaded),
        Msg::RemovePhoto => model.remove_photo(),
        Msg::Submit => {
            if model.loading {
                return;
            }

            model.error = None;
            model.loading = true;

            let (name, email, avatar) = (model.name.clone(), model.email.clone(), model.avatar.clone());
            orders.perform_cmd(async move {
                Msg::Registered(session::register(name, email, avatar).await)
            });
        }
        Msg::Registered(Ok(user)) => {
            model.loading = false;
            log::info!("Registered {}", user.name);
            session.sign_in(user);
        }
        Msg::Registered(Err(e)) => {
            model.loading = false;
            log::error!("Registration failed: {}", e);
            model.error = Some(REGISTER_FAILED.into());
        }
    }
}

fn selected_file(event: web_sys::Event) -> Option<web_sys::File> {
    event
        .target()?
        .dyn_into::<HtmlInputElement>()
        .ok()?
        .files()?
        .get(0)
}

fn photo_view(model: &Model) -> Node<Msg> {
    let preview = match model.preview() {
        Some(src) => div![
            C!["photo-preview"],
            img![attrs! {At::Src => src, At::Alt => "Profile preview"}],
            button![
                C!["btn-remove-photo"],
                attrs! {At::Type => "button"},
                ev(Ev::Click, |_| Msg::RemovePhoto),
                "✕ Remove"
            ],
        ],
        None => div![
            C!["photo-upload-area"],
            div![C!["upload-icon"], "📷"],
            p!["Click to upload a 1:1 square photo"],
            span![C!["upload-hint"], "Max 5MB • JPG, PNG"],
        ],
    };

    div![
        C!["photo-upload-section"],
        preview,
        input![
            el_ref(&model.file_input),
            C!["photo-input"],
            attrs! {At::Type => "file", At::Accept => "image/*"},
            style! {St::Display => "none"},
            ev(Ev::Change, |event| Msg::PhotoSelected(selected_file(event))),
        ],
        button![
            C!["btn", "btn-secondary"],
            attrs! {At::Type => "button"},
            ev(Ev::Click, |_| Msg::ChoosePhoto),
            if model.preview().is_some() {
                "📷 Change Photo"
            } else {
                "📷 Upload Photo"
            }
        ],
    ]
}

pub fn view(model: &Model, session: &Session) -> Node<Msg> {
    if !is_visible(session) {
        return empty![];
    }

    div![
        C!["modal-overlay"],
        div![
            C!["modal-content", "register-modal"],
            div![
                C!["modal-header"],
                h2!["💜 Welcome to Purple Player"],
                p!["Tell us who you are"],
            ],
            model.error().map(|error| div![C!["modal-error"], error]),
            form![
                C!["modal-form"],
                ev(Ev::Submit, |event| {
                    event.prevent_default();
                    Msg::Submit
                }),
                div![
                    C!["form-group"],
                    label!["Your Name"],
                    input![
                        attrs! {
                            At::Type => "text",
                            At::Placeholder => "e.g., Samra ( Purple )",
                            At::Value => model.name,
                            At::Required => AtValue::None,
                        },
                        input_ev(Ev::Input, Msg::NameChanged),
                    ],
                ],
                div![
                    C!["form-group"],
                    label!["Email Address (Gmail)"],
                    input![
                        attrs! {
                            At::Type => "email",
                            At::Placeholder => "your@gmail.com",
                            At::Value => model.email,
                            At::Required => AtValue::None,
                        },
                        input_ev(Ev::Input, Msg::EmailChanged),
                    ],
                ],
                div![
                    C!["form-group"],
                    label!["Profile Photo ", span![C!["optional"], "(1:1 ratio)"]],
                    photo_view(model),
                ],
                p![
                    C!["modal-hint"],
                    "Your info is saved securely. We use it to show your online status to the other person."
                ],
                button![
                    C!["btn", "btn-primary"],
                    attrs! {At::Type => "submit", At::Disabled => model.is_loading().as_at_value()},
                    if model.is_loading() {
                        "Creating account..."
                    } else {
                        "💜 Enter Purple Player"
                    }
                ],
            ],
            p![
                C!["modal-footer"],
                "✨ Only you and one other person will see this information"
            ],
        ],
    ]
}
