// ABOUTME: Shared test support: scripted provider, probe and recording observer.
// ABOUTME: Scripts replay canned responses in order and repeat the last one forever.

#![allow(dead_code)]

use async_trait::async_trait;
use deploy_wait::error::{Error, Result};
use deploy_wait::observer::{Observer, WaitEvent};
use deploy_wait::provider::{Deploy, DeployProvider, ProbeError, UrlProbe};
use deploy_wait::types::{DeployId, SiteId};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Build a deploy record.
pub fn deploy(id: &str, name: &str, commit: &str, context: Option<&str>, state: &str) -> Deploy {
    Deploy {
        id: DeployId::new(id),
        name: name.to_string(),
        commit_ref: Some(commit.to_string()),
        context: context.map(str::to_string),
        state: state.to_string(),
    }
}

/// Replays steps in order, then repeats the final step.
struct Script<T: Clone> {
    steps: Mutex<VecDeque<T>>,
    last: Mutex<Option<T>>,
    calls: Mutex<usize>,
}

impl<T: Clone> Script<T> {
    fn new(steps: Vec<T>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            last: Mutex::new(None),
            calls: Mutex::new(0),
        }
    }

    fn next(&self) -> T {
        *self.calls.lock() += 1;
        let mut last = self.last.lock();
        if let Some(step) = self.steps.lock().pop_front() {
            *last = Some(step);
        }
        last.clone().expect("script has no steps")
    }

    fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[derive(Debug, Clone)]
pub enum ListStep {
    Deploys(Vec<Deploy>),
    Null,
    Fail(String),
}

#[derive(Debug, Clone)]
pub enum GetStep {
    State(String),
    Fail(String),
}

/// Deploy provider whose answers are scripted per call.
pub struct ScriptedProvider {
    lists: Script<ListStep>,
    gets: Script<GetStep>,
    /// Template for records returned by `get_deploy`; only `state` varies.
    record: Deploy,
    fetched: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn new(lists: Vec<ListStep>, gets: Vec<GetStep>, record: Deploy) -> Self {
        Self {
            lists: Script::new(lists),
            gets: Script::new(gets),
            record,
            fetched: Mutex::new(Vec::new()),
        }
    }

    /// Provider that only answers list requests.
    pub fn listing(lists: Vec<ListStep>) -> Self {
        Self::new(lists, vec![], deploy("unused", "unused", "0", None, "new"))
    }

    /// Provider that only answers single-deploy requests with these states.
    pub fn with_states(states: &[&str]) -> Self {
        let gets = states.iter().map(|s| GetStep::State(s.to_string())).collect();
        Self::new(vec![], gets, deploy("d1", "mysite", "abc123", None, "new"))
    }

    pub fn list_calls(&self) -> usize {
        self.lists.calls()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.calls()
    }

    /// `(site_id, deploy_id)` of every `get_deploy` call.
    pub fn fetched(&self) -> Vec<(String, String)> {
        self.fetched.lock().clone()
    }
}

#[async_trait]
impl DeployProvider for ScriptedProvider {
    async fn list_deploys(&self, _site_id: &SiteId) -> Result<Option<Vec<Deploy>>> {
        match self.lists.next() {
            ListStep::Deploys(deploys) => Ok(Some(deploys)),
            ListStep::Null => Ok(None),
            ListStep::Fail(msg) => Err(Error::Http(msg)),
        }
    }

    async fn get_deploy(&self, site_id: &SiteId, deploy_id: &DeployId) -> Result<Deploy> {
        self.fetched
            .lock()
            .push((site_id.to_string(), deploy_id.to_string()));
        match self.gets.next() {
            GetStep::State(state) => Ok(Deploy {
                id: deploy_id.clone(),
                state,
                ..self.record.clone()
            }),
            GetStep::Fail(msg) => Err(Error::Http(msg)),
        }
    }
}

/// URL probe whose outcomes are scripted per attempt.
pub struct ScriptedProbe {
    script: Script<std::result::Result<(), ProbeError>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    pub fn new(outcomes: Vec<std::result::Result<(), ProbeError>>) -> Self {
        Self {
            script: Script::new(outcomes),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_up() -> Self {
        Self::new(vec![Ok(())])
    }

    pub fn always_down() -> Self {
        Self::new(vec![Err(ProbeError::Status(503))])
    }

    pub fn calls(&self) -> usize {
        self.script.calls()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl UrlProbe for ScriptedProbe {
    async fn probe(&self, url: &str) -> std::result::Result<(), ProbeError> {
        self.urls.lock().push(url.to_string());
        self.script.next()
    }
}

/// Observer that keeps every event.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<WaitEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<WaitEvent> {
        self.events.lock().clone()
    }
}

impl Observer for RecordingObserver {
    fn notify(&self, event: &WaitEvent) {
        self.events.lock().push(event.clone());
    }
}
