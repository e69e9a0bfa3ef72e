//! Server-rendered HTML for the login and dashboard pages.
//!
//! The dashboard carries a small script that posts the bookmark forms to the
//! JSON API and keeps the list current from `/api/bookmarks/changes`, merging
//! events the same way [`BookmarkList::apply`](crate::managers::list_state::BookmarkList::apply) does.

use crate::types::bookmark::Bookmark;
use crate::types::user::User;

const STYLES: &str = ":root{--bg:#f9fafb;--fg:#111827;--muted:#6b7280;--border:#e5e7eb;--accent:#2563eb;--danger:#dc2626;--radius:8px;--font:-apple-system,BlinkMacSystemFont,\"Segoe UI\",Helvetica,Arial,sans-serif}\
*{margin:0;padding:0;box-sizing:border-box}\
body{font-family:var(--font);background:var(--bg);color:var(--fg)}\
header{display:flex;justify-content:space-between;align-items:center;padding:16px 24px;background:#fff;border-bottom:1px solid var(--border)}\
main{max-width:760px;margin:0 auto;padding:24px}\
.card{background:#fff;border:1px solid var(--border);border-radius:var(--radius);padding:20px;margin-bottom:16px}\
input{width:100%;padding:8px 10px;border:1px solid var(--border);border-radius:var(--radius);margin:4px 0 12px}\
button,.button{display:inline-block;padding:8px 16px;border:0;border-radius:var(--radius);background:var(--accent);color:#fff;font-weight:600;cursor:pointer;text-decoration:none}\
button.danger{background:var(--danger)}button.plain{background:#f3f4f6;color:var(--fg)}\
.error{color:var(--danger);margin-bottom:12px}.muted{color:var(--muted);font-size:14px}\
.bookmark{display:flex;justify-content:space-between;align-items:center;gap:12px}\
.bookmark a{color:var(--fg);font-weight:600;text-decoration:none;word-break:break-all}\
.views{float:right}.views button{padding:4px 10px}.views button[aria-pressed=true]{background:var(--accent);color:#fff}\
#bookmarks.table .bookmark{border-radius:0;margin:0;padding:8px 12px}#bookmarks.table .bookmark+.bookmark{border-top:0}";

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn page(title: &str, body: &str, js: &str) -> String {
    let mut html = String::with_capacity(body.len() + js.len() + STYLES.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">");
    html.push_str("<title>");
    html.push_str(&escape_html(title));
    html.push_str("</title><style>");
    html.push_str(STYLES);
    html.push_str("</style></head><body>");
    html.push_str(body);
    if !js.is_empty() {
        html.push_str("<script>");
        html.push_str(js);
        html.push_str("</script>");
    }
    html.push_str("</body></html>");
    html
}

pub fn login_page(authorize_url: &str, notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!("<p class=\"error\">{}</p>", escape_html(n)))
        .unwrap_or_default();
    let body = format!(
        "<main><div class=\"card\"><h1>Smart Bookmark</h1>\
         <p class=\"muted\">Save your favorite links with real-time sync across devices.</p><br>\
         {notice}<a class=\"button\" href=\"{href}\">Sign in with Google</a></div></main>",
        href = escape_html(authorize_url),
    );
    page("Sign in - Smart Bookmark", &body, "")
}

fn bookmark_item(bookmark: &Bookmark) -> String {
    format!(
        "<li class=\"card bookmark\" data-id=\"{id}\"><div><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{title}</a>\
         <div class=\"muted\">{url}</div><div class=\"muted\">Added <time data-ts=\"{created_at}\"></time></div></div><div>\
         <button class=\"plain\" data-action=\"edit\">Edit</button> \
         <button class=\"danger\" data-action=\"delete\">Delete</button></div></li>",
        id = escape_html(&bookmark.id),
        url = escape_html(&bookmark.url),
        title = escape_html(&bookmark.title),
        created_at = bookmark.created_at,
    )
}

pub fn dashboard_page(user: &User, bookmarks: &[Bookmark]) -> String {
    let items: String = bookmarks.iter().map(bookmark_item).collect();
    let body = format!(
        "<header><div><strong>Smart Bookmark</strong><div class=\"muted\">{email}</div></div>\
         <form action=\"/auth/signout\" method=\"post\"><button class=\"danger\" type=\"submit\">Sign Out</button></form></header>\
         <main><form id=\"bookmark-form\" class=\"card\"><h2 id=\"form-title\">Add New Bookmark</h2>\
         <p id=\"form-error\" class=\"error\" hidden></p>\
         <label for=\"title\">Title</label><input id=\"title\" name=\"title\" required placeholder=\"My favorite website\">\
         <label for=\"url\">URL</label><input id=\"url\" name=\"url\" type=\"url\" required placeholder=\"https://example.com\">\
         <button type=\"submit\" id=\"submit\">Add Bookmark</button> \
         <button type=\"button\" class=\"plain\" id=\"cancel\" hidden>Cancel</button></form>\
         <h2>Your Bookmarks (<span id=\"count\">{count}</span>) <span class=\"muted\">Live</span>\
         <span class=\"views\"><button type=\"button\" class=\"plain\" data-view=\"card\" aria-pressed=\"true\">Card view</button> \
         <button type=\"button\" class=\"plain\" data-view=\"table\" aria-pressed=\"false\">Table view</button></span></h2><br>\
         <p id=\"empty\" class=\"muted\"{empty_hidden}>No bookmarks yet. Add your first one above.</p>\
         <ul id=\"bookmarks\" style=\"list-style:none\">{items}</ul></main>",
        email = escape_html(&user.email),
        count = bookmarks.len(),
        empty_hidden = if bookmarks.is_empty() { "" } else { " hidden" },
    );
    page("Dashboard - Smart Bookmark", &body, DASHBOARD_JS)
}

const DASHBOARD_JS: &str = r#"
var list=document.getElementById('bookmarks'),form=document.getElementById('bookmark-form');
var err=document.getElementById('form-error'),editing=null;
function esc(s){var d=document.createElement('div');d.textContent=s;return d.innerHTML.replace(/"/g,'&quot;')}
function render(b){var li=document.createElement('li');li.className='card bookmark';li.dataset.id=b.id;
  li.innerHTML='<div><a href="'+esc(b.url)+'" target="_blank" rel="noopener noreferrer">'+esc(b.title)+'</a><div class="muted">'+esc(b.url)+'</div><div class="muted">Added <time data-ts="'+b.created_at+'"></time></div></div><div><button class="plain" data-action="edit">Edit</button> <button class="danger" data-action="delete">Delete</button></div>';
  stamp(li);return li}
function stamp(root){root.querySelectorAll('time[data-ts]').forEach(function(t){
  t.textContent=new Date(Number(t.dataset.ts)*1000).toLocaleDateString('en-US',{year:'numeric',month:'short',day:'numeric'})})}
stamp(list);
document.querySelectorAll('.views button').forEach(function(b){b.addEventListener('click',function(){
  list.classList.toggle('table',b.dataset.view==='table');
  document.querySelectorAll('.views button').forEach(function(o){o.setAttribute('aria-pressed',String(o===b))})})});
function find(id){return list.querySelector('li[data-id="'+CSS.escape(id)+'"]')}
function refresh(){var n=list.children.length;document.getElementById('count').textContent=n;document.getElementById('empty').hidden=n>0}
function resetForm(){editing=null;form.reset();document.getElementById('form-title').textContent='Add New Bookmark';
  document.getElementById('submit').textContent='Add Bookmark';document.getElementById('cancel').hidden=true}
function apply(ev){var held=find(ev.id);
  if(ev.event==='INSERT'){if(!held)list.appendChild(render(ev))}
  else if(ev.event==='UPDATE'){if(held)list.replaceChild(render(ev),held)}
  else if(ev.event==='DELETE'){if(held)held.remove()}
  refresh()}
var source=new EventSource('/api/bookmarks/changes');
['INSERT','UPDATE','DELETE'].forEach(function(k){source.addEventListener(k,function(e){apply(JSON.parse(e.data))})});
form.addEventListener('submit',function(e){e.preventDefault();err.hidden=true;
  var target=editing?'/api/bookmarks/'+encodeURIComponent(editing):'/api/bookmarks';
  fetch(target,{method:'POST',body:new URLSearchParams(new FormData(form))}).then(function(r){return r.json()}).then(function(res){
    if(res.success){resetForm()}else{err.textContent=res.error||'Something went wrong';err.hidden=false}})});
document.getElementById('cancel').addEventListener('click',resetForm);
list.addEventListener('click',function(e){var btn=e.target.closest('button');if(!btn)return;
  var li=btn.closest('li'),id=li.dataset.id;
  if(btn.dataset.action==='delete'){if(confirm('Delete this bookmark?'))fetch('/api/bookmarks/'+encodeURIComponent(id)+'/delete',{method:'POST'})}
  else{editing=id;var a=li.querySelector('a');document.getElementById('title').value=a.textContent;document.getElementById('url').value=a.getAttribute('href');
    document.getElementById('form-title').textContent='Edit Bookmark';document.getElementById('submit').textContent='Update Bookmark';
    document.getElementById('cancel').hidden=false;window.scrollTo({top:0,behavior:'smooth'})}});
"#;
