//! Static HTML served by the viewer endpoints.
//!
//! Pages never embed the media identifier or the access token; the content
//! element points at the token-guarded content route and the browser carries
//! the token in its cookie.

use super::dispatch::ViewKind;

const CONTENT_ROUTE: &str = "/view/content";

pub(super) fn viewer_page(kind: ViewKind) -> String {
    let body = match kind {
        ViewKind::Image => format!(r#"<img src="{}" alt="media file">"#, CONTENT_ROUTE),
        ViewKind::Audio => format!(
            r#"<audio controls src="{}">Your browser does not support audio playback.</audio>"#,
            CONTENT_ROUTE
        ),
        ViewKind::Video => format!(
            r#"<video controls src="{}">Your browser does not support video playback.</video>"#,
            CONTENT_ROUTE
        ),
        ViewKind::Document => format!(
            r#"<embed src="{}" type="application/pdf" width="100%" height="100%">"#,
            CONTENT_ROUTE
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Media Viewer</title>
<style>
body {{ margin: 0; background: #222; display: flex; justify-content: center; align-items: center; height: 100vh; }}
img, video, embed {{ max-width: 100%; max-height: 100vh; }}
</style>
</head>
<body>
{}
</body>
</html>
"#,
        body
    )
}

pub(super) fn not_found_page() -> String {
    error_page("Media file not found")
}

pub(super) fn general_error_page() -> String {
    error_page("Media file request cannot be processed")
}

fn error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Media Viewer</title>
</head>
<body>
<p>{}</p>
</body>
</html>
"#,
        message
    )
}
