//! conduit: a uniform interface for reading, writing and listing resources
//! whether they live on the local filesystem or behind an HTTP(S) endpoint.
//!
//! Every backend implements the same [`Driver`] contract; callers pick the
//! driver for a path's scheme and hand it the scheme-stripped remainder.

pub use conduit_driver::{Driver, Error, Result};

pub use conduit_fs as fs;
pub use conduit_http as http;

pub use conduit_fs::{Home, LocalDriver, LocalHandle};
pub use conduit_http::{HttpConfig, HttpDriver, Pool, Scheme};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drivers_share_one_contract() {
        let dir = tempfile::tempdir().unwrap();
        let home = Home::new(dir.path().to_str().unwrap());

        let drivers: Vec<Box<dyn Driver>> = vec![
            Box::new(LocalDriver::new(home)),
            Box::new(HttpDriver::from_config(&HttpConfig::default(), Scheme::Https).unwrap()),
        ];

        let names: Vec<&str> = drivers.iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["file", "https"]);
        assert!(!drivers[0].is_remote());
        assert!(drivers[1].is_remote());

        drivers[0].put("~/x", b"local").unwrap();
        assert_eq!(drivers[0].get("~/x").unwrap(), Some(b"local".to_vec()));
        assert!(drivers[1].glob("example.com/*", false).is_err());
    }
}
