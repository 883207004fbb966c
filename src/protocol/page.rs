//! HTML page
//!
//! Renders the single page of the utility from a `View`. The page is a thin
//! shell over the JSON API: every button calls an endpoint and reloads.

use crate::controller::View;
use crate::error::types::format_limit;
use crate::storage::Scope;

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }
h1 { font-size: 1.6rem; }
section { margin-top: 1.5rem; }
ul.files { list-style: none; padding: 0; }
ul.files li { display: flex; gap: 0.5rem; align-items: center; padding: 0.25rem 0; }
ul.files li span { flex: 1; word-break: break-all; }
.notice { padding: 0.5rem; background: #e7f6e7; border: 1px solid #9c9; }
.error { padding: 0.5rem; background: #fbe9e9; border: 1px solid #c99; }
"#;

const SCRIPT: &str = r#"
const NOTICE_KEY = "dept-share-notice";

function showError(message) {
  const box = document.getElementById("error");
  box.textContent = message;
  box.hidden = false;
}

async function call(method, url, body, headers) {
  const response = await fetch(url, { method, body, headers, credentials: "same-origin" });
  let payload = null;
  try { payload = await response.json(); } catch (_) {}
  if (!response.ok) {
    showError(payload && payload.message ? payload.message : "Request failed.");
    return null;
  }
  return payload;
}

function reloadWith(view) {
  if (view && view.notice) {
    sessionStorage.setItem(NOTICE_KEY, view.notice);
  }
  window.location.reload();
}

document.addEventListener("DOMContentLoaded", () => {
  const stored = sessionStorage.getItem(NOTICE_KEY);
  if (stored) {
    sessionStorage.removeItem(NOTICE_KEY);
    const box = document.getElementById("notice");
    if (box) { box.textContent = stored; box.hidden = false; }
  }

  const loginForm = document.getElementById("login-form");
  if (loginForm) {
    loginForm.addEventListener("submit", async (event) => {
      event.preventDefault();
      const body = JSON.stringify({
        username: loginForm.username.value,
        password: loginForm.password.value,
      });
      const view = await call("POST", "/api/login", body, { "Content-Type": "application/json" });
      if (view) reloadWith(view);
    });
  }

  const logout = document.getElementById("logout");
  if (logout) {
    logout.addEventListener("click", async () => {
      const view = await call("POST", "/api/logout");
      if (view) reloadWith(view);
    });
  }

  const uploadForm = document.getElementById("upload-form");
  if (uploadForm) {
    uploadForm.addEventListener("submit", async (event) => {
      event.preventDefault();
      const file = uploadForm.file.files[0];
      if (!file) { showError("Choose a file first."); return; }
      const scope = uploadForm.global.checked ? "global" : "department";
      const url = "/api/files/" + scope + "/" + encodeURIComponent(file.name);
      const view = await call("PUT", url, file, { "Content-Type": "application/octet-stream" });
      if (view) reloadWith(view);
    });
  }

  document.querySelectorAll("button[data-delete]").forEach((button) => {
    button.addEventListener("click", async () => {
      const url = "/api/files/" + button.dataset.scope + "/" + encodeURIComponent(button.dataset.delete);
      const view = await call("DELETE", url);
      if (view) reloadWith(view);
    });
  });
});
"#;

/// Renders the full page for `view`. `max_file_size` is shown next to the
/// upload form.
pub fn render_page(view: &View, max_file_size: u64) -> String {
    let body = match view {
        View::LoggedOut => render_login(),
        View::LoggedIn {
            username,
            department,
            department_files,
            global_files,
            ..
        } => {
            let mut body = format!(
                "<p>Logged in as <strong>{}</strong> ({} department) \
                 <button id=\"logout\" type=\"button\">Logout</button></p>\n",
                escape_html(username),
                escape_html(department)
            );
            body.push_str(&render_upload(max_file_size));
            body.push_str(&render_folder(
                &format!("{} Department Files", department),
                Scope::Department,
                department_files,
                "No files uploaded in your department folder.",
            ));
            body.push_str(&render_folder(
                "Global Files",
                Scope::Global,
                global_files,
                "No files in the Global folder.",
            ));
            body
        }
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Department File Sharing</title>\n<style>{STYLE}</style>\n\
         <script>{SCRIPT}</script>\n</head>\n<body>\n\
         <h1>Department File Sharing</h1>\n\
         <div id=\"notice\" class=\"notice\" hidden></div>\n\
         <div id=\"error\" class=\"error\" hidden></div>\n\
         {body}</body>\n</html>\n"
    )
}

fn render_login() -> String {
    "<form id=\"login-form\">\n\
     <label>Username <input name=\"username\" autocomplete=\"username\"></label>\n\
     <label>Password <input name=\"password\" type=\"password\" autocomplete=\"current-password\"></label>\n\
     <button type=\"submit\">Login</button>\n\
     </form>\n"
        .to_string()
}

fn render_upload(max_file_size: u64) -> String {
    format!(
        "<section>\n<h2>Upload File</h2>\n<form id=\"upload-form\">\n\
         <input name=\"file\" type=\"file\">\n\
         <label><input name=\"global\" type=\"checkbox\"> Upload to Global Folder</label>\n\
         <button type=\"submit\">Upload</button>\n\
         <small>Maximum size: {}</small>\n</form>\n</section>\n",
        format_limit(max_file_size)
    )
}

fn render_folder(title: &str, scope: Scope, files: &[String], empty_message: &str) -> String {
    let mut html = format!("<section>\n<h2>{}</h2>\n", escape_html(title));
    if files.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", empty_message));
    } else {
        html.push_str("<ul class=\"files\">\n");
        for name in files {
            let escaped = escape_html(name);
            html.push_str(&format!(
                "<li><span>{escaped}</span>\
                 <a href=\"/api/files/{scope}/{href}\" download>Download</a>\
                 <button type=\"button\" data-scope=\"{scope}\" data-delete=\"{escaped}\">Delete</button></li>\n",
                scope = scope.as_str(),
                href = super::responses::encode_component(name),
            ));
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</section>\n");
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in(department_files: Vec<String>, global_files: Vec<String>) -> View {
        View::LoggedIn {
            username: "alice".into(),
            department: "AI".into(),
            department_files,
            global_files,
            notice: None,
        }
    }

    #[test]
    fn test_logged_out_page_shows_login_only() {
        let page = render_page(&View::LoggedOut, 1024);
        assert!(page.contains("id=\"login-form\""));
        assert!(!page.contains("id=\"upload-form\""));
        assert!(!page.contains("id=\"logout\""));
    }

    #[test]
    fn test_empty_folders_show_messages() {
        let page = render_page(&logged_in(vec![], vec![]), 1024 * 1024 * 1024);
        assert!(page.contains("AI Department Files"));
        assert!(page.contains("No files uploaded in your department folder."));
        assert!(page.contains("No files in the Global folder."));
        assert!(page.contains("Upload to Global Folder"));
        assert!(page.contains("Maximum size: 1GB"));
    }

    #[test]
    fn test_file_entries_are_escaped() {
        let page = render_page(&logged_in(vec!["id_<b>.txt".into()], vec![]), 1024);
        assert!(page.contains("id_&lt;b&gt;.txt"));
        assert!(page.contains("/api/files/department/id_%3Cb%3E.txt"));
        assert!(!page.contains("<b>.txt"));
    }
}
