//! Playlist email composition: multipart alternative with an HTML body and
//! a plain-text mirror.

use super::PlaylistEmail;
use crate::recommend::{PlaylistLink, Selection};
use chrono::Local;

/// Tracks shown in the preview section; the rest is summarized as a count.
const PREVIEW_TRACKS: usize = 5;

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn artist_line(artists: &[String]) -> String {
    if artists.is_empty() {
        "Various Artists".to_string()
    } else {
        artists.join(", ")
    }
}

/// Build the playlist email for a full-mode selection.
pub fn compose_playlist_email(selection: &Selection, link: &PlaylistLink) -> PlaylistEmail {
    let emotion_title = title_case(&selection.emotion);
    let generated_on = Local::now().format("%B %d, %Y at %I:%M %p");
    let track_count = selection.tracks.len();

    let mut previews_html = String::new();
    let mut previews_text = String::new();
    for (i, track) in selection.tracks.iter().take(PREVIEW_TRACKS).enumerate() {
        let artists = artist_line(&track.artists);
        previews_html.push_str(&format!(
            "<div class=\"song-preview\"><strong>{}. {}</strong><br>\
             <span class=\"muted\">by {}</span></div>\n",
            i + 1,
            track.name,
            artists
        ));
        previews_text.push_str(&format!("{}. {} by {}\n", i + 1, track.name, artists));
    }
    if track_count > PREVIEW_TRACKS {
        let more = track_count - PREVIEW_TRACKS;
        previews_html.push_str(&format!(
            "<div class=\"song-preview muted\">+ {} more songs waiting for you!</div>\n",
            more
        ));
        previews_text.push_str(&format!("+ {} more songs!\n", more));
    }

    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
body {{ font-family: Arial, sans-serif; background-color: #000; color: #fff; margin: 0; padding: 20px; }}
.container {{ max-width: 600px; margin: 0 auto; background-color: #121212; border-radius: 15px; padding: 30px; }}
.header {{ text-align: center; background: #1DB954; color: #000; padding: 20px; border-radius: 10px; margin-bottom: 30px; }}
.playlist-button {{ background: #1DB954; color: #000; padding: 20px 40px; border-radius: 25px; text-decoration: none; font-weight: bold; font-size: 1.2rem; display: inline-block; margin: 20px 0; }}
.song-preview {{ background: #1a1a1a; border: 1px solid #404040; border-radius: 8px; padding: 15px; margin: 10px 0; }}
.muted {{ color: #B3B3B3; }}
.footer {{ text-align: center; margin-top: 30px; color: #B3B3B3; font-size: 0.9rem; }}
</style>
</head>
<body>
<div class="container">
  <div class="header">
    <h1>MoodStream</h1>
    <h2>Your {emotion_title} Playlist</h2>
    <p>Generated on {generated_on}</p>
  </div>
  <p>Hello!</p>
  <p>Based on your <strong>{emotion}</strong> mood, we've curated a collection of <strong>{track_count}</strong> handpicked songs to match your vibe!</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{link_url}" class="playlist-button" target="_blank">Discover Similar Music</a>
  </div>
  <h3 style="color: #1DB954; margin-top: 30px;">Preview of Your Songs:</h3>
  <div class="song-previews">
{previews_html}
  </div>
  <div class="footer">
    <p>Use these recommendations to find similar tracks!</p>
    <p><em>- Team MoodStream</em></p>
  </div>
</div>
</body>
</html>
"#,
        emotion_title = emotion_title,
        generated_on = generated_on,
        emotion = selection.emotion,
        track_count = track_count,
        link_url = link.url,
        previews_html = previews_html,
    );

    let text_body = format!(
        "MoodStream - Your {emotion_title} Playlist\n\
         Generated on {generated_on}\n\n\
         Hello!\n\n\
         Based on your {emotion} mood, we've curated a collection of {track_count} handpicked songs to match your vibe!\n\n\
         Discover similar music: {link_url}\n\n\
         Your song recommendations:\n\
         {previews_text}\n\
         Use these recommendations to find similar tracks!\n\n\
         - Team MoodStream\n",
        emotion_title = emotion_title,
        generated_on = generated_on,
        emotion = selection.emotion,
        track_count = track_count,
        link_url = link.url,
        previews_text = previews_text,
    );

    PlaylistEmail {
        subject: format!("Your {} Playlist from MoodStream", emotion_title),
        text_body,
        html_body,
    }
}
