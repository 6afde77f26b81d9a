use chrono::{DateTime, Utc};
use seed::{prelude::*, *};

use shared::lib::{count_online, time_ago, truncate_title, OnlineUser, Stats, TopSong, Track};

use crate::api::{self, ApiError};
use crate::session::Session;

const POLL_INTERVAL_MS: u32 = 5_000;

pub struct Model {
    stats: Stats,
    online_users: Vec<OnlineUser>,
    top_song: Option<TopSong>,
    // Dropping the handle stops the online-users poll.
    _poll: Option<StreamHandle>,
}

#[derive(Debug)]
pub enum Msg {
    StatsFetched(Result<Vec<Track>, ApiError>),
    PollOnlineUsers,
    OnlineUsersFetched(Result<Vec<OnlineUser>, ApiError>),
    TopSongFetched(Result<Option<Track>, ApiError>),
    SignOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fetch {
    Stats,
    TopSong,
    OnlineUsers,
}

// Online users are fetched right away, then again on every poll tick.
const ON_MOUNT: [Fetch; 3] = [Fetch::Stats, Fetch::TopSong, Fetch::OnlineUsers];

async fn fetch(kind: Fetch) -> Msg {
    match kind {
        Fetch::Stats => Msg::StatsFetched(api::fetch_tracks().await),
        Fetch::TopSong => Msg::TopSongFetched(api::fetch_top_song().await),
        Fetch::OnlineUsers => Msg::OnlineUsersFetched(api::fetch_online_users().await),
    }
}

pub fn init(orders: &mut impl Orders<Msg>) -> Model {
    for kind in ON_MOUNT.iter().copied() {
        orders.perform_cmd(fetch(kind));
    }

    Model {
        _poll: Some(orders.stream_with_handle(streams::interval(POLL_INTERVAL_MS, || {
            Msg::PollOnlineUsers
        }))),
        ..Model::detached()
    }
}

impl Model {
    /// A home model with no poll attached.
    pub fn detached() -> Self {
        Model {
            stats: Stats::default(),
            online_users: Vec::new(),
            top_song: None,
            _poll: None,
        }
    }

    fn on_stats(&mut self, fetched: Result<Vec<Track>, ApiError>) {
        match fetched {
            Ok(tracks) => self.stats = Stats::from_tracks(&tracks),
            Err(e) => log::error!("Failed to load stats: {}", e),
        }
    }

    fn on_online_users(&mut self, fetched: Result<Vec<OnlineUser>, ApiError>) {
        match fetched {
            Ok(users) => self.online_users = users,
            Err(e) => log::error!("Failed to load online users: {}", e),
        }
    }

    fn on_top_song(&mut self, fetched: Result<Option<Track>, ApiError>) {
        match fetched {
            Ok(Some(track)) => self.top_song = Some(TopSong::from(track)),
            Ok(None) => {}
            Err(e) => log::error!("Failed to load top song: {}", e),
        }
    }
}

pub fn update(msg: Msg, model: &mut Model, session: &mut Session, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::StatsFetched(fetched) => model.on_stats(fetched),
        Msg::PollOnlineUsers => {
            orders.skip().perform_cmd(fetch(Fetch::OnlineUsers));
        }
        Msg::OnlineUsersFetched(fetched) => model.on_online_users(fetched),
        Msg::TopSongFetched(fetched) => model.on_top_song(fetched),
        Msg::SignOut => session.logout(),
    }
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

fn header_view(session: &Session) -> Node<Msg> {
    header![
        C!["home-header"],
        div![
            C!["header-content"],
            div![C!["logo-large"], "💜"],
            h1!["Purple Player"],
            p!["A space where every song tells our story"],
            session.user().map(|user| div![
                C!["user-greeting-section"],
                p![C!["user-greeting"], format!("Welcome, {}! 👋", user.name)],
                button![
                    C!["btn-logout"],
                    ev(Ev::Click, |_| Msg::SignOut),
                    "👋 Sign Out"
                ],
            ]),
        ]
    ]
}

fn stat_card(kind: &str, icon: &str, value: String, label: &str, desc: &str) -> Node<Msg> {
    div![
        C!["stat-card", kind],
        div![C!["stat-icon"], icon],
        div![C!["stat-value"], value],
        div![C!["stat-label"], label],
        p![C!["stat-desc"], desc],
    ]
}

fn stats_view(stats: &Stats) -> Node<Msg> {
    section![
        C!["stats-grid"],
        stat_card(
            "primary",
            "🎵",
            stats.songs.to_string(),
            "Songs Shared",
            "Amazing moments captured"
        ),
        stat_card(
            "secondary",
            "💬",
            stats.messages.to_string(),
            "Messages",
            "Words of affection"
        ),
        stat_card("tertiary", "❤️", "100%".into(), "Connection", "Always here"),
    ]
}

fn top_song_view(song: &TopSong) -> Node<Msg> {
    section![
        C!["now-playing"],
        h2!["🏆 Most Played"],
        div![
            C!["song-card-featured"],
            div![C!["song-artwork"], "🎵"],
            div![
                C!["song-info"],
                h3![truncate_title(&song.title)],
                p![song.artist.as_str()],
                div![
                    C!["song-meta"],
                    span![format!("♥️ {} plays", song.plays)],
                    span![format!("⏱️ {}", song.duration)],
                ],
            ],
        ],
    ]
}

fn user_card(user: &OnlineUser, now: DateTime<Utc>) -> Node<Msg> {
    let status = if user.is_online { "online" } else { "offline" };
    let ago = time_ago(user.last_seen, now);

    div![
        C!["user-card", status],
        div![C!["user-avatar"], user.initial()],
        div![
            C!["user-info"],
            h3![user.name.as_str()],
            div![
                C!["user-status"],
                span![C!["status-dot", status]],
                span![
                    C!["status-text"],
                    if user.is_online {
                        "Online Now".to_string()
                    } else {
                        format!("Offline {}", ago)
                    }
                ],
            ],
            user.listening()
                .map(|listening| div![C!["listening"], span![format!("🎧 {}", listening)]]),
            p![
                C!["last-visit"],
                if user.is_online {
                    "Active now".to_string()
                } else {
                    format!("Last seen {}", ago)
                }
            ],
        ],
    ]
}

fn online_view(users: &[OnlineUser]) -> Node<Msg> {
    let body = if users.is_empty() {
        div![
            C!["no-users"],
            p!["No one is here right now, but you can still add songs! 💜"]
        ]
    } else {
        let now = now();
        div![
            C!["online-users"],
            users.iter().map(|user| user_card(user, now))
        ]
    };

    section![
        C!["online-section"],
        h2![format!("👥 Who's Here ({})", count_online(users))],
        body,
    ]
}

fn actions_view() -> Node<Msg> {
    section![
        C!["action-buttons"],
        a![
            C!["btn", "btn-primary"],
            attrs! {At::Href => "/add-song"},
            span!["🎵"],
            " Add a Song"
        ],
        a![
            C!["btn", "btn-secondary"],
            attrs! {At::Href => "/player"},
            span!["▶️"],
            " Listen"
        ],
    ]
}

fn creator_link(href: &str, name: &str) -> Node<Msg> {
    a![
        C!["creator-link"],
        attrs! {At::Href => href, At::Target => "_blank", At::Rel => "noopener noreferrer"},
        name
    ]
}

fn about_view() -> Node<Msg> {
    footer![
        C!["home-footer", "row", "my-5", "footer-bg"],
        div![
            C!["col-md-3", "footer-logo"],
            img![attrs! {At::Src => "/logo.png", At::Alt => "Purple Player Logo"}],
        ],
        div![
            C!["footer-content", "col-md-9"],
            h3!["About Purple Player"],
            p![
                "A Friendly, ad-free music-sharing app where every song tells a story. \
                 A digital love letter where you and someone special can share your \
                 favorite songs with personal messages."
            ],
            div![
                C!["footer-creators", "text-center"],
                h4!["Made by"],
                p![
                    creator_link("https://github.com/abdul-rahman-1", "Abdul Rahman"),
                    " for his purple 💜"
                ],
                p![creator_link("https://github.com/1-Samra-Khan", "Samra Khan")],
            ],
            div![
                C!["footer-tech", "text-center"],
                p!["Built with Rust + Seed (Frontend) • Express + MongoDB (Backend)"],
                p!["YouTube-based music sharing • No Ads • No Distractions • Just Music & Love 💜"],
            ],
        ],
    ]
}

pub fn view(model: &Model, session: &Session) -> Node<Msg> {
    div![
        C!["page-home"],
        div![
            C!["home-container"],
            header_view(session),
            about_view(),
            stats_view(&model.stats),
            model.top_song.as_ref().map(top_song_view),
            online_view(&model.online_users),
            actions_view(),
        ]
    ]
}
