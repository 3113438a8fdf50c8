#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use crossway::{Handler, Middleware, Request, Response};

pub fn log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Handler that appends `tag` to the shared log and writes it as the body.
pub fn recording_handler(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Handler {
    let log = Arc::clone(log);
    let tag = tag.to_string();
    Handler::from_fn(move |_args, _req, res| {
        log.lock().unwrap().push(tag.clone());
        res.set_text(tag.clone());
        Ok(())
    })
}

/// Middleware that records `tag`, then passes or vetoes.
pub struct RecordingMiddleware {
    tag: String,
    pass: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl RecordingMiddleware {
    pub fn passing(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Arc<dyn Middleware> {
        Arc::new(Self {
            tag: tag.to_string(),
            pass: true,
            log: Arc::clone(log),
        })
    }

    pub fn vetoing(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Arc<dyn Middleware> {
        Arc::new(Self {
            tag: tag.to_string(),
            pass: false,
            log: Arc::clone(log),
        })
    }
}

impl Middleware for RecordingMiddleware {
    fn handle(&self, _req: &Request, res: &mut Response) -> bool {
        self.log.lock().unwrap().push(self.tag.clone());
        if !self.pass {
            res.set_status(403).set_text("stopped");
        }
        self.pass
    }
}
