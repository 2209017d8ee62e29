#![forbid(unsafe_code)]

use path_absolutize::Absolutize;
use std::ops::Deref;
use std::path::Path;
use chrono::{Utc, DateTime};

use poem::Request;

use log::{debug, LevelFilter};

// ***************************************************************************
// GENERAL PUBLIC FUNCTIONS
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_absolute_path:
// ---------------------------------------------------------------------------
/** Replace tilde (~) and environment variable values in a path name and
 * then construct the absolute path name.  Unlike canonicalize, absolutize
 * does not require the file to exist.
 *
 * On any failure the original path is returned unchanged.
 */
pub fn get_absolute_path(path: &str) -> String {
    let s = match shellexpand::full(path) {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };

    let p = Path::new(s.deref());
    let p1 = match p.absolutize() {
        Ok(x) => x,
        Err(_) => return path.to_owned(),
    };
    match p1.to_str() {
        Some(x) => x.to_owned(),
        None => path.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// timestamp_utc:
// ---------------------------------------------------------------------------
/** Get the current UTC timestamp */
pub fn timestamp_utc() -> DateTime<Utc> {
    Utc::now()
}

// ---------------------------------------------------------------------------
// is_blank:
// ---------------------------------------------------------------------------
/** True when the string is empty or contains only whitespace.  The ascii
 * file, group, record and unit separators (U+001C..U+001F) also count.
 */
pub fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c))
}

// ***************************************************************************
//                                  Traits
// ***************************************************************************
pub trait RequestDebug {
    type Req;
    fn get_request_info(&self) -> String;
}

// ---------------------------------------------------------------------------
// debug_request:
// ---------------------------------------------------------------------------
// Dump http request information to the log.
pub fn debug_request(http_req: &Request, req: &impl RequestDebug) {
    // Skip the formatting work unless debug logging is on.
    if log::max_level() < LevelFilter::Debug {
        return;
    }

    let mut s = "\n".to_string();

    let uri = http_req.uri();
    s += format!("  {} URI: {:?}\n", http_req.method(), uri).as_str();

    for (name, value) in http_req.headers().iter() {
        s += format!("  Header: {} = {:?} \n", name, value).as_str();
    }

    if let Some(q) = uri.query() {
        s += format!("  Query Parameters: {:?}\n", q).as_str();
    } else {
        s += "  * No Query Parameters\n";
    }

    s += req.get_request_info().as_str();

    // Write the single log record.
    debug!("{}", s);
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names() {
        assert!(is_blank(""));
        assert!(is_blank(" "));
        assert!(is_blank(" \t\n"));
        assert!(is_blank("\u{00a0}\u{2003}"));
        assert!(is_blank("\u{1c}\u{1d}\u{1e}\u{1f}"));
        assert!(!is_blank("\u{1b}"));
        assert!(!is_blank("Fausto"));
        assert!(!is_blank("  x  "));
    }

    #[test]
    fn absolute_paths() {
        assert!(Path::new(&get_absolute_path("relative/dir")).is_absolute());
        assert_eq!(get_absolute_path("/etc/hello"), "/etc/hello");
    }

    #[test]
    fn timestamps_are_current() {
        let before = Utc::now();
        let ts = timestamp_utc();
        assert!(ts >= before);
    }
}
