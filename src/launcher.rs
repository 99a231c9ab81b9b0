use crate::utils::host_url;
use log::debug;
use std::collections::BTreeSet;
use std::io;

pub trait BrowserLauncher {
    fn open_tab(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs in the desktop's default browser.
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open_tab(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}

/// Open `https://<host>` for every name, in sorted order. Best effort:
/// launch failures are only logged. Returns how many tabs were requested.
pub fn open_host_tabs(launcher: &dyn BrowserLauncher, names: &BTreeSet<String>) -> usize {
    for name in names {
        let url = host_url(name);
        if let Err(e) = launcher.open_tab(&url) {
            debug!("Failed to open {}: {}", url, e);
        }
    }
    names.len()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    pub(crate) struct RecordingLauncher {
        pub opened: RefCell<Vec<String>>,
        pub fail: bool,
    }

    impl BrowserLauncher for RecordingLauncher {
        fn open_tab(&self, url: &str) -> io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
            } else {
                Ok(())
            }
        }
    }

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_opens_sorted_https_urls() {
        let launcher = RecordingLauncher::default();
        let opened = open_host_tabs(&launcher, &names(&["www.example.com", "api.example.com", "example.com."]));

        assert_eq!(opened, 3);
        assert_eq!(
            *launcher.opened.borrow(),
            vec![
                "https://api.example.com",
                "https://example.com",
                "https://www.example.com",
            ]
        );
    }

    #[test]
    fn test_failures_do_not_stop_remaining_tabs() {
        let launcher = RecordingLauncher {
            fail: true,
            ..RecordingLauncher::default()
        };
        let opened = open_host_tabs(&launcher, &names(&["a.example.com", "b.example.com"]));
        assert_eq!(opened, 2);
        assert_eq!(launcher.opened.borrow().len(), 2);
    }
}
