pub mod lib {
    use chrono::{DateTime, Utc};
    use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

    /// Titles longer than this many characters are cut and given an ellipsis.
    pub const TITLE_MAX_CHARS: usize = 25;

    const UNKNOWN: &str = "Unknown";

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    pub struct User {
        pub name: String,
        pub email: String,
        #[serde(default)]
        pub avatar: Option<String>,
    }

    #[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
    pub struct Track {
        #[serde(default, deserialize_with = "nullable_string")]
        pub title: String,
        #[serde(default, deserialize_with = "nullable_string")]
        pub artist: String,
        #[serde(default)]
        pub message: Option<String>,
    }

    impl Track {
        pub fn has_message(&self) -> bool {
            self.message
                .as_deref()
                .map_or(false, |message| !message.trim().is_empty())
        }
    }

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct OnlineUser {
        pub name: String,
        #[serde(default)]
        pub is_online: bool,
        #[serde(default, deserialize_with = "lenient_timestamp")]
        pub last_seen: Option<DateTime<Utc>>,
        #[serde(default)]
        pub currently_listening: Option<String>,
    }

    impl OnlineUser {
        /// First character of the name, upper-cased. Empty for an empty name.
        pub fn initial(&self) -> String {
            self.name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default()
        }

        /// What the user is playing, but only while they are online.
        pub fn listening(&self) -> Option<&str> {
            if !self.is_online {
                return None;
            }

            self.currently_listening
                .as_deref()
                .filter(|listening| !listening.is_empty())
        }
    }

    /// The "Most Played" card. `plays` and `duration` are display placeholders,
    /// the backend does not report them.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TopSong {
        pub title: String,
        pub artist: String,
        pub plays: u32,
        pub duration: String,
    }

    impl From<Track> for TopSong {
        fn from(track: Track) -> Self {
            TopSong {
                title: or_unknown(track.title),
                artist: or_unknown(track.artist),
                plays: 1,
                duration: "...".into(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Stats {
        pub songs: usize,
        pub messages: usize,
    }

    impl Stats {
        pub fn from_tracks(tracks: &[Track]) -> Self {
            Stats {
                songs: tracks.len(),
                messages: tracks.iter().filter(|x| x.has_message()).count(),
            }
        }
    }

    pub fn count_online(users: &[OnlineUser]) -> usize {
        users.iter().filter(|x| x.is_online).count()
    }

    pub fn truncate_title(title: &str) -> String {
        match title.char_indices().nth(TITLE_MAX_CHARS) {
            Some((cut, _)) => format!("{}...", &title[..cut]),
            None => title.to_string(),
        }
    }

    /// Coarse age of `last_seen` relative to `now`. Timestamps in the future
    /// count as zero seconds old.
    pub fn time_ago(last_seen: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
        let last_seen = match last_seen {
            Some(last_seen) => last_seen,
            None => return "recently".into(),
        };

        let seconds = (now - last_seen).num_seconds().max(0);
        if seconds < 60 {
            return "just now".into();
        }

        let minutes = seconds / 60;
        if minutes < 60 {
            return format!("{}m", minutes);
        }

        let hours = minutes / 60;
        if hours < 24 {
            return format!("{}h", hours);
        }

        let days = hours / 24;
        if days < 7 {
            return format!("{}d", days);
        }

        format!("{}w", days / 7)
    }

    fn or_unknown(value: String) -> String {
        if value.is_empty() {
            UNKNOWN.into()
        } else {
            value
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        EpochMillis(i64),
        Text(String),
        Other(IgnoredAny),
    }

    /// Accepts RFC 3339 strings and epoch milliseconds. Anything unreadable
    /// becomes `None` so one odd record does not sink the whole list.
    fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<RawTimestamp>::deserialize(deserializer)? {
            Some(RawTimestamp::EpochMillis(millis)) => DateTime::from_timestamp_millis(millis),
            Some(RawTimestamp::Text(text)) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|x| x.with_timezone(&Utc)),
            Some(RawTimestamp::Other(_)) | None => None,
        })
    }

    fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::{Duration, TimeZone};

        fn now() -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2025, 2, 14, 12, 0, 0).unwrap()
        }

        fn ago(seconds: i64) -> String {
            time_ago(Some(now() - Duration::seconds(seconds)), now())
        }

        fn track(message: Option<&str>) -> Track {
            Track {
                title: "Yellow".into(),
                artist: "Coldplay".into(),
                message: message.map(String::from),
            }
        }

        fn online_user(name: &str, is_online: bool) -> OnlineUser {
            OnlineUser {
                name: name.into(),
                is_online,
                last_seen: None,
                currently_listening: Some("Yellow".into()),
            }
        }

        #[test]
        fn test_time_ago() {
            assert_eq!(time_ago(None, now()), "recently");
            assert_eq!(ago(0), "just now");
            assert_eq!(ago(30), "just now");
            assert_eq!(ago(59), "just now");
            assert_eq!(ago(90), "1m");
            assert_eq!(ago(3599), "59m");
            assert_eq!(ago(7200), "2h");
            assert_eq!(ago(3 * 86400), "3d");
            assert_eq!(ago(10 * 86400), "1w");
            assert_eq!(ago(15 * 86400), "2w");
        }

        #[test]
        fn test_time_ago_future_is_just_now() {
            assert_eq!(ago(-3600), "just now");
        }

        #[test]
        fn test_stats_from_tracks() {
            let tracks = vec![
                track(Some("for you")),
                track(Some("   ")),
                track(Some("")),
                track(None),
                track(Some("\n miss you \t")),
            ];

            assert_eq!(
                Stats::from_tracks(&tracks),
                Stats {
                    songs: 5,
                    messages: 2
                }
            );
            assert_eq!(Stats::from_tracks(&[]), Stats::default());
        }

        #[test]
        fn test_count_online_ignores_offline_users() {
            let users = vec![
                online_user("samra", true),
                online_user("abdul", false),
                online_user("guest", false),
            ];

            assert_eq!(count_online(&users), 1);
            assert_eq!(users.len(), 3);
        }

        #[test]
        fn test_initial() {
            assert_eq!(online_user("samra", true).initial(), "S");
            assert_eq!(online_user("ümit", true).initial(), "Ü");
            assert_eq!(online_user("", true).initial(), "");
        }

        #[test]
        fn test_listening_only_while_online() {
            assert_eq!(online_user("samra", true).listening(), Some("Yellow"));
            assert_eq!(online_user("samra", false).listening(), None);

            let mut quiet = online_user("samra", true);
            quiet.currently_listening = Some("".into());
            assert_eq!(quiet.listening(), None);
        }

        #[test]
        fn test_truncate_title() {
            let exact = "a".repeat(TITLE_MAX_CHARS);
            assert_eq!(truncate_title(&exact), exact);
            assert_eq!(
                truncate_title("Somewhere Only We Know (Live at Wembley)"),
                "Somewhere Only We Know (L..."
            );
            assert_eq!(truncate_title(&"é".repeat(30)), format!("{}...", "é".repeat(25)));
            assert_eq!(truncate_title(""), "");
        }

        #[test]
        fn test_top_song_defaults_to_unknown() {
            let song = TopSong::from(Track::default());

            assert_eq!(song.title, "Unknown");
            assert_eq!(song.artist, "Unknown");
            assert_eq!(song.plays, 1);
            assert_eq!(song.duration, "...");
        }

        #[test]
        fn test_track_from_backend_json() {
            let track: Track = serde_json::from_str(
                r#"{"_id":"1","title":null,"artist":"Adele","youtubeId":"x"}"#,
            )
            .unwrap();

            assert_eq!(track.title, "");
            assert_eq!(track.artist, "Adele");
            assert_eq!(track.message, None);
        }

        #[test]
        fn test_online_user_from_backend_json() {
            let users: Vec<OnlineUser> = serde_json::from_str(
                r#"[
                    {"name":"samra","isOnline":true,"currentlyListening":"Yellow"},
                    {"name":"abdul","isOnline":false,"lastSeen":"2025-02-14T11:58:00.000Z","currentlyListening":null}
                ]"#,
            )
            .unwrap();

            assert_eq!(users[0].listening(), Some("Yellow"));
            assert_eq!(users[1].last_seen, Some(now() - Duration::minutes(2)));
            assert_eq!(time_ago(users[1].last_seen, now()), "2m");
        }

        #[test]
        fn test_online_user_last_seen_formats() {
            let users: Vec<OnlineUser> = serde_json::from_str(
                r#"[
                    {"name":"samra","isOnline":false,"lastSeen":1739534280000},
                    {"name":"abdul","isOnline":false,"lastSeen":"yesterday"},
                    {"name":"guest","isOnline":true,"lastSeen":null}
                ]"#,
            )
            .unwrap();

            assert_eq!(users.len(), 3);
            assert_eq!(users[0].last_seen, Some(now() - Duration::minutes(2)));
            assert_eq!(users[1].last_seen, None);
            assert_eq!(time_ago(users[1].last_seen, now()), "recently");
            assert_eq!(users[2].last_seen, None);
        }
    }
}
