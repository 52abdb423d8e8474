use regex::Regex;
use std::sync::LazyLock;

use super::mood::Mood;
use super::phrases::random_index;

pub const MAX_RECENT_SEARCHES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub channel: String,
}

impl Video {
    fn from_entry(entry: &(&str, &str, &str)) -> Self {
        Self {
            id: entry.0.to_string(),
            title: entry.1.to_string(),
            channel: entry.2.to_string(),
        }
    }

    /// A video known only by id (pasted URL or id)
    pub fn direct(id: &str) -> Self {
        lookup(id).unwrap_or_else(|| Self {
            id: id.to_string(),
            title: format!("YouTube video {}", id),
            channel: "YouTube".to_string(),
        })
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

type Entry = (&'static str, &'static str, &'static str);

const LOFI: &[Entry] = &[
    ("5qap5aO4i9A", "lofi hip hop radio - beats to relax/study to", "Lofi Girl"),
    ("jfKfPfyJRdk", "lofi hip hop radio - beats to study/relax to", "Lofi Girl"),
    ("DWcJFNfaw9c", "lofi hip hop radio - beats to sleep/chill to", "Lofi Girl"),
    ("rUxyKA_-grg", "lofi hip hop radio - sad & sleepy beats", "the bootleg boy"),
    ("lTRiuFIWV54", "late night lofi hip hop radio", "Chillhop Music"),
];

const CLASSICAL: &[Entry] = &[
    ("mIYzp5rcTvU", "The Best of Classical Music", "HALIDONMUSIC"),
    ("jgpJVI3tDbY", "Classical Music for Studying & Brain Power", "HALIDONMUSIC"),
    ("c1Qr7TnWG74", "Mozart Classical Music for Studying", "Classical Music"),
    ("XYiIR-d9y-I", "Chopin - Nocturnes", "Classical Music"),
    ("1BxLGD4BSbA", "Relaxing Classical Piano Music", "Relaxing Classical Music"),
];

const JAZZ: &[Entry] = &[
    ("neV3EPgvZ3g", "Relaxing Jazz Piano Radio", "Cafe Music BGM"),
    ("Dx5qFachd3A", "Jazz Music • Smooth Jazz Saxophone", "Relax Music"),
    ("fEvM-OUbaKs", "Jazz Cafe Music - Relaxing Bossa Nova Music", "Cafe Music BGM"),
    ("DSGyEsJ17cI", "Relaxing Jazz Music - Background Chill Out Music", "Cafe Music BGM"),
    ("PErqNqXeAQo", "Smooth Jazz Coffee Music", "Coffee Music"),
];

const AMBIENT: &[Entry] = &[
    ("tNkZsRW7h2c", "Space Ambient Music", "Ambient"),
    ("sjkrrmBnpGE", "Deep Focus Music", "4K Video Nature"),
    ("77ZozI0rw7w", "Ambient Study Music To Concentrate", "Quiet Quest"),
    ("qvXvqHOMqJA", "Beautiful Ambient Music • Peaceful Piano Music", "Soothing Relaxation"),
    ("n8NHvuFZD5A", "Ambient Music for Deep Focus", "Yellow Brick Cinema"),
];

const NATURE: &[Entry] = &[
    ("eKFTSSKCzWA", "Relaxing Nature Sounds", "Nature Sounds"),
    ("qRTVg8HHzUo", "Relaxing Music with Nature Sounds", "Yellow Brick Cinema"),
    ("WZKW2Hq2fks", "Relaxing Rain Sounds", "Nature White Noise"),
    ("IvjMgVS6kng", "Forest Sounds | Woodland Ambience", "The Guild of Ambience"),
    ("d0tU18Ybcvk", "Ocean Wave Sounds for Sleep", "The Sleep Sounds"),
];

const FOCUS: &[Entry] = &[
    ("BTYAsjAVa3I", "Deep Focus Music - 4 Hours Study Music", "Yellow Brick Cinema"),
    ("WPni755-Krg", "Concentration Music", "Quiet Quest"),
    ("ARxV-CRL9Vs", "Alpha Waves Study Music", "Greenred Productions"),
    ("sjkrrmBnpGE", "Deep Focus Music", "4K Video Nature"),
    ("kMAOey45mJI", "Study Music Alpha Waves", "YellowBrickCinema"),
];

const BOLLYWOOD: &[Entry] = &[
    ("V7LwfY5U5WI", "Best of Bollywood Lofi", "Lofi Bollywood"),
    ("eHr-g6MU_H8", "Bollywood Lofi Hits", "Lofi Indian"),
    ("K5KAc5CoCuk", "Hindi Lofi Songs", "Bollywood Butter"),
    ("c_iRx2Un07k", "Bollywood Chill Mix", "Desi Vibes"),
    ("1YBl3Zbt80A", "Bollywood Lofi Study Mix", "Indian Lofi"),
    ("NeXbmEnpSz0", "Hindi Songs 2023", "Bollywood Music"),
    ("pFxBxvIGmvU", "Old Hindi Songs", "Bollywood Classics"),
    ("Dpp1sIL1m5Q", "Bollywood Romantic Songs", "T-Series"),
    ("X96pBw_rjrk", "Hindi Hits Songs 2023", "Venus Music"),
    ("5Eqb_-j3FDA", "Arijit Singh Best Songs", "Sony Music India"),
];

const KPOP: &[Entry] = &[
    ("v3hbWS_a8HI", "K-pop Playlist 2023", "K-Music"),
    ("T9DLuEjzqY0", "K-pop Lofi Mix", "Lofi K-pop"),
    ("WFsAon_TWPQ", "K-pop Chill Vibes", "K-Vibes"),
    ("8M3WUaeIbOk", "K-pop Study Playlist", "Study K-pop"),
    ("f5_wn8mexmM", "K-pop Hits 2023", "K-pop Radio"),
];

const INDIE: &[Entry] = &[
    ("wQkz_EXAqFc", "Indie/Pop/Folk Compilation", "alexrainbirdMusic"),
    ("lSoM2sJ4N1M", "Indie Folk Central", "Indie Folk Central"),
    ("nt4SnLRLlFk", "Indie/Rock/Alternative Compilation", "alexrainbirdMusic"),
    ("5yx6BWlEVcY", "Indie Playlist 2023", "Indie Music"),
    ("YqN8S3RKnTY", "Indie Coffee Shop Vibes", "Indie Vibes"),
];

const POP: &[Entry] = &[
    ("kffacxfA7G4", "Justin Bieber - Baby ft. Ludacris", "JustinBieberVEVO"),
    ("JGwWNGJdvx8", "Ed Sheeran - Shape of You", "Ed Sheeran"),
    ("RgKAFK5djSk", "Wiz Khalifa - See You Again ft. Charlie Puth", "Wiz Khalifa"),
    ("fRh_vgS2dFE", "Justin Bieber - Sorry", "JustinBieberVEVO"),
    ("YQHsXMglC9A", "Adele - Hello", "AdeleVEVO"),
];

const EDM: &[Entry] = &[
    ("gCYcHz2k5x0", "Martin Garrix - Animals", "Spinnin' Records"),
    ("60ItHLz5WEA", "Alan Walker - Faded", "Alan Walker"),
    ("k2qgadSvNyU", "Dua Lipa - New Rules", "Dua Lipa"),
    ("kJQP7kiw5Fk", "Luis Fonsi - Despacito ft. Daddy Yankee", "LuisFonsiVEVO"),
    ("papuvlVeZg8", "The Chainsmokers - Don't Let Me Down", "ChainsmokersVEVO"),
];

const ROCK: &[Entry] = &[
    ("fJ9rUzIMcZQ", "Queen - Bohemian Rhapsody", "Queen Official"),
    ("eVTXPUF4Oz4", "Linkin Park - In The End", "Linkin Park"),
    ("hTWKbfoikeg", "Nirvana - Smells Like Teen Spirit", "NirvanaVEVO"),
    ("1w7OgIMMRc4", "Guns N' Roses - Sweet Child O' Mine", "GunsNRosesVEVO"),
    ("lDK9QqIzhwk", "Bon Jovi - Livin' On A Prayer", "BonJoviVEVO"),
];

const TAYLOR_SWIFT: &[Entry] = &[
    ("e-ORhEE9VVg", "Taylor Swift - Blank Space", "TaylorSwiftVEVO"),
    ("QcIy9NiNbmo", "Taylor Swift - Bad Blood ft. Kendrick Lamar", "TaylorSwiftVEVO"),
    ("3tmd-ClpJxA", "Taylor Swift - Look What You Made Me Do", "TaylorSwiftVEVO"),
    ("IdneKLhsWOQ", "Taylor Swift - Shake It Off", "TaylorSwiftVEVO"),
    ("VuNIsY6JdUw", "Taylor Swift - You Belong With Me", "TaylorSwiftVEVO"),
];

const ARIJIT_SINGH: &[Entry] = &[
    ("5Eqb_-j3FDA", "Arijit Singh Best Songs", "Sony Music India"),
    ("hoNb6HuNmU0", "Arijit Singh - Tum Hi Ho", "T-Series"),
    ("C8jScp-ys-Y", "Arijit Singh - Channa Mereya", "Sony Music India"),
    ("Wd2B8OAotU8", "Arijit Singh - Kabira", "YRF"),
    ("cNV5hLSa9H8", "Arijit Singh - Ae Dil Hai Mushkil", "Sony Music India"),
];

const DESPACITO: &[Entry] = &[(
    "kJQP7kiw5Fk",
    "Luis Fonsi - Despacito ft. Daddy Yankee",
    "LuisFonsiVEVO",
)];

const SEE_YOU_AGAIN: &[Entry] = &[(
    "RgKAFK5djSk",
    "Wiz Khalifa - See You Again ft. Charlie Puth",
    "Wiz Khalifa",
)];

const GANGNAM_STYLE: &[Entry] = &[("9bZkp7q19f0", "PSY - Gangnam Style", "officialpsy")];

const UPTOWN: &[Entry] = &[(
    "OPf0YbXqDm0",
    "Mark Ronson - Uptown Funk ft. Bruno Mars",
    "MarkRonsonVEVO",
)];

const FRENCH: &[Entry] = &[
    ("K5KAc5CoCuk", "French Lofi Mix", "Lofi French"),
    ("DWcJFNfaw9c", "French Cafe Music", "Cafe Music"),
    ("rUxyKA_-grg", "French Pop Hits", "French Music"),
    ("lTRiuFIWV54", "French Classics", "French Classics"),
    ("Ij65wvAGX-c", "Indila - Dernière Danse", "IndilaVEVO"),
];

const INDILA: &[Entry] = &[
    ("Ij65wvAGX-c", "Indila - Dernière Danse", "IndilaVEVO"),
    ("K5KAc5CoCuk", "Indila - Love Story", "IndilaVEVO"),
    ("DWcJFNfaw9c", "Indila - Tourner Dans Le Vide", "IndilaVEVO"),
    ("rUxyKA_-grg", "Indila - S.O.S", "IndilaVEVO"),
    ("lTRiuFIWV54", "Indila - Ainsi Bas La Vida", "IndilaVEVO"),
];

/// Catalog categories in search order
pub const CATALOG: &[(&str, &[Entry])] = &[
    ("lofi", LOFI),
    ("classical", CLASSICAL),
    ("jazz", JAZZ),
    ("ambient", AMBIENT),
    ("nature", NATURE),
    ("focus", FOCUS),
    ("bollywood", BOLLYWOOD),
    ("kpop", KPOP),
    ("indie", INDIE),
    ("pop", POP),
    ("edm", EDM),
    ("rock", ROCK),
    ("taylorswift", TAYLOR_SWIFT),
    ("arijitsingh", ARIJIT_SINGH),
    ("despacito", DESPACITO),
    ("seeyouagain", SEE_YOU_AGAIN),
    ("gangnamstyle", GANGNAM_STYLE),
    ("uptown", UPTOWN),
    ("french", FRENCH),
    ("indila", INDILA),
];

/// Keyword groups that force a category; later groups win
const KEYWORD_OVERRIDES: &[(&[&str], &str)] = &[
    (&["bollywood", "hindi", "indian", "desi"], "bollywood"),
    (&["kpop", "k-pop", "korean", "bts", "blackpink"], "kpop"),
    (&["french", "france", "indila", "derniere", "danse"], "french"),
    (&["taylor", "swift"], "taylorswift"),
    (&["arijit", "singh"], "arijitsingh"),
    (&["despacito"], "despacito"),
    (&["see you again", "charlie puth"], "seeyouagain"),
    (&["gangnam", "psy"], "gangnamstyle"),
    (&["uptown", "funk", "bruno mars"], "uptown"),
];

pub fn category(name: &str) -> Option<Vec<Video>> {
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, entries)| entries.iter().map(Video::from_entry).collect())
}

fn all_videos() -> impl Iterator<Item = &'static Entry> {
    CATALOG.iter().flat_map(|(_, entries)| entries.iter())
}

fn lookup(id: &str) -> Option<Video> {
    all_videos().find(|e| e.0 == id).map(Video::from_entry)
}

/// Default catalog category for a mood
pub fn mood_category(mood: Mood) -> &'static str {
    match mood {
        Mood::Motivated | Mood::Lazy => "lofi",
        Mood::FeelingLow | Mood::Creative => "classical",
        Mood::Energized => "jazz",
        Mood::Focused => "focus",
    }
}

pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

static BARE_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

static URL_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").unwrap()
});

/// Pull a YouTube video id out of a bare id or any common URL shape
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if BARE_ID_RE.is_match(input) {
        return Some(input.to_string());
    }
    let caps = URL_ID_RE.captures(input)?;
    let id = caps.get(2)?.as_str();
    if id.len() == 11 {
        Some(id.to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The query was a video id or URL
    Direct(Video),
    Results {
        videos: Vec<Video>,
        /// Set when a whole category was returned
        category: Option<&'static str>,
    },
    NoMatches,
}

pub const NO_MATCHES_MESSAGE: &str =
    "No matches found. Try searching for specific artists, songs, or genres like bollywood, kpop, pop, rock, etc.";

/// Search the built-in catalog
pub fn search(query: &str) -> SearchOutcome {
    let query = query.trim();
    if query.is_empty() {
        return SearchOutcome::NoMatches;
    }
    if let Some(id) = extract_video_id(query) {
        return SearchOutcome::Direct(Video::direct(&id));
    }

    let q = query.to_lowercase();
    let mut results: Vec<&Entry> = all_videos()
        .filter(|e| e.1.to_lowercase().contains(&q))
        .collect();

    if results.is_empty() {
        results = all_videos()
            .filter(|e| e.2.to_lowercase().contains(&q))
            .collect();
    }

    if results.is_empty() {
        let terms: Vec<&str> = q.split_whitespace().filter(|t| t.len() > 1).collect();
        results = all_videos()
            .filter(|e| {
                let title = e.1.to_lowercase();
                let channel = e.2.to_lowercase();
                terms.iter().any(|t| title.contains(t) || channel.contains(t))
            })
            .collect();
    }

    let mut matched_category: Option<&'static str> = None;

    if let Some((name, entries)) = CATALOG.iter().find(|(n, _)| *n == q) {
        results = entries.iter().collect();
        matched_category = Some(name);
    }

    if results.is_empty() {
        if let Some((name, entries)) = CATALOG
            .iter()
            .find(|(n, _)| n.contains(q.as_str()) || q.contains(n))
        {
            results = entries.iter().collect();
            matched_category = Some(name);
        }
    }

    for (keywords, name) in KEYWORD_OVERRIDES {
        if keywords.iter().any(|k| q.contains(k)) {
            if let Some((_, entries)) = CATALOG.iter().find(|(n, _)| n == name) {
                results = entries.iter().collect();
            }
        }
    }

    if results.is_empty() {
        return SearchOutcome::NoMatches;
    }
    SearchOutcome::Results {
        videos: results.into_iter().map(Video::from_entry).collect(),
        category: matched_category,
    }
}

/// Record a search: most recent first, no duplicates, capped
pub fn record_search(recent: &mut Vec<String>, query: &str) {
    let query = query.trim();
    if query.is_empty() {
        return;
    }
    recent.retain(|q| q != query);
    recent.insert(0, query.to_string());
    recent.truncate(MAX_RECENT_SEARCHES);
}

/// Queue-based player state. Playback itself happens outside the terminal.
#[derive(Debug, Clone)]
pub struct Player {
    pub queue: Vec<Video>,
    pub current: Option<usize>,
    pub playing: bool,
    pub volume: u8,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub liked: Vec<String>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            current: None,
            playing: false,
            volume: 70,
            muted: false,
            shuffle: false,
            repeat: false,
            liked: Vec::new(),
        }
    }
}

impl Player {
    pub fn current_video(&self) -> Option<&Video> {
        self.current.and_then(|i| self.queue.get(i))
    }

    /// Fill an empty player with a random pick from the mood's category
    pub fn load_mood_playlist(&mut self, mood: Mood) {
        if self.current.is_some() {
            return;
        }
        if let Some(videos) = category(mood_category(mood)) {
            let idx = random_index(videos.len());
            self.queue = videos;
            self.current = Some(idx);
        }
    }

    /// Replace the queue and select `index`
    pub fn set_queue(&mut self, videos: Vec<Video>, index: usize) {
        if videos.is_empty() {
            return;
        }
        self.current = Some(index.min(videos.len() - 1));
        self.queue = videos;
    }

    /// Select a video, adding it to the queue if it is not there
    pub fn select(&mut self, video: Video) {
        let idx = match self.queue.iter().position(|v| v.id == video.id) {
            Some(i) => i,
            None => {
                self.queue.push(video);
                self.queue.len() - 1
            }
        };
        self.current = Some(idx);
        self.playing = true;
    }

    pub fn toggle_play(&mut self) -> bool {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
        self.playing
    }

    pub fn next(&mut self) {
        self.step(true);
    }

    pub fn prev(&mut self) {
        self.step(false);
    }

    fn step(&mut self, forward: bool) {
        let len = self.queue.len();
        if len == 0 {
            return;
        }
        let cur = self.current.unwrap_or(0);
        let idx = if self.repeat {
            cur
        } else if self.shuffle {
            random_index(len)
        } else if forward {
            (cur + 1) % len
        } else {
            (cur + len - 1) % len
        };
        self.current = Some(idx);
    }

    /// Set volume 0-100; zero means muted
    pub fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(0, 100) as u8;
        self.muted = self.volume == 0;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn effective_volume(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume
        }
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.iter().any(|l| l == id)
    }

    /// Toggle like on a video; returns true when it is now liked
    pub fn toggle_like(&mut self, id: &str) -> bool {
        if self.is_liked(id) {
            self.liked.retain(|l| l != id);
            false
        } else {
            self.liked.push(id.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_video_id() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(extract_video_id("lofi beats"), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn test_search_direct_id() {
        match search("https://youtu.be/5qap5aO4i9A") {
            SearchOutcome::Direct(v) => {
                assert_eq!(v.id, "5qap5aO4i9A");
                assert_eq!(v.channel, "Lofi Girl");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_title_then_channel() {
        match search("Chopin") {
            SearchOutcome::Results { videos, category } => {
                assert_eq!(videos.len(), 1);
                assert_eq!(videos[0].id, "XYiIR-d9y-I");
                assert_eq!(category, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        match search("halidonmusic") {
            SearchOutcome::Results { videos, .. } => assert_eq!(videos.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_exact_category_replaces_results() {
        match search("jazz") {
            SearchOutcome::Results { videos, category } => {
                assert_eq!(category, Some("jazz"));
                assert_eq!(videos.len(), 5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_keyword_override() {
        match search("korean music") {
            SearchOutcome::Results { videos, .. } => {
                assert!(videos.iter().all(|v| v.title.contains("K-pop")));
            }
            other => panic!("unexpected {:?}", other),
        }
        match search("hindi") {
            SearchOutcome::Results { videos, .. } => assert_eq!(videos.len(), 10),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_search_no_matches() {
        assert_eq!(search("zzqx"), SearchOutcome::NoMatches);
        assert_eq!(search("   "), SearchOutcome::NoMatches);
    }

    #[test]
    fn test_record_search() {
        let mut recent = Vec::new();
        for q in ["a1", "b2", "c3", "d4", "e5", "f6"] {
            record_search(&mut recent, q);
        }
        assert_eq!(recent, vec!["f6", "e5", "d4", "c3", "b2"]);
        record_search(&mut recent, "c3");
        assert_eq!(recent, vec!["c3", "f6", "e5", "d4", "b2"]);
    }

    #[test]
    fn test_player_navigation_wraps() {
        let mut player = Player::default();
        player.set_queue(category("lofi").unwrap(), 0);
        player.prev();
        assert_eq!(player.current, Some(4));
        player.next();
        assert_eq!(player.current, Some(0));
        player.repeat = true;
        player.next();
        assert_eq!(player.current, Some(0));
    }

    #[test]
    fn test_shuffle_stays_within_queue() {
        let mut player = Player::default();
        let queue = category("lofi").unwrap();
        let len = queue.len();
        player.set_queue(queue, 2);
        player.shuffle = true;
        for _ in 0..50 {
            player.next();
            assert!(player.current.is_some_and(|i| i < len));
            player.prev();
            assert!(player.current.is_some_and(|i| i < len));
        }
        assert!(player.current_video().is_some());

        player.repeat = true;
        let held = player.current;
        player.next();
        assert_eq!(player.current, held);
    }

    #[test]
    fn test_player_volume_and_like() {
        let mut player = Player::default();
        player.set_volume(0);
        assert!(player.muted);
        player.set_volume(40);
        assert!(!player.muted);
        player.toggle_mute();
        assert_eq!(player.effective_volume(), 0);

        assert!(player.toggle_like("abc"));
        assert!(player.is_liked("abc"));
        assert!(!player.toggle_like("abc"));
    }

    #[test]
    fn test_mood_playlist_only_when_empty() {
        let mut player = Player::default();
        player.load_mood_playlist(Mood::Focused);
        assert_eq!(player.queue, category("focus").unwrap());
        let picked = player.current;
        player.load_mood_playlist(Mood::Energized);
        assert_eq!(player.current, picked);
        assert_eq!(player.queue, category("focus").unwrap());
    }

    #[test]
    fn test_select_adds_unknown_video() {
        let mut player = Player::default();
        player.select(Video::direct("abcdefghijk"));
        assert_eq!(player.queue.len(), 1);
        assert!(player.playing);
        assert_eq!(
            player.current_video().unwrap().watch_url(),
            "https://www.youtube.com/watch?v=abcdefghijk"
        );
    }
}
