//! Test utilities and browser-free fakes for the cedula_scrape test suite

#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use cedula_scrape::{
    CedulaRecord, Engine, EngineLauncher, LaunchError, QueryPage, RecordSink, SinkError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Builds a response page with the three standard result cards
#[allow(dead_code)]
pub fn response_html(
    cedula: &str,
    name: &str,
    birth_date: &str,
    province: &str,
    table: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<body>
  <div class="card">
    <div class="card-header">Datos Generales</div>
    <div class="card-body">
      <p><b>Nombre:</b> {name}</p>
      <p><b>Cedula:</b> {cedula}</p>
      <p><b>F. Nacimiento:</b> {birth_date}</p>
      <p><b>Edad:</b> 34</p>
      <p><b>Sexo:</b> F</p>
    </div>
  </div>
  <div class="card">
    <div class="card-header">Residencia Electoral</div>
    <div class="card-body">
      <p>Provincia: {province}</p>
      <p>Distrito: PANAMA</p>
      <p>Corregimiento: BELLA VISTA</p>
    </div>
  </div>
  <div class="card">
    <div class="card-header">Centro de Votacion</div>
    <div class="card-body">
      <p>Centro de Votacion: COLEGIO JAVIER</p>
      <p>Mesa #: {table}</p>
    </div>
  </div>
</body>
</html>"#
    )
}

#[derive(Debug, Default)]
struct PageState {
    typed: String,
    current: Option<String>,
    calls: Vec<String>,
}

/// Scripted stand-in for the query form
///
/// Submitting renders the response registered for the typed value; an
/// unregistered value renders no cards. The typed value survives navigation,
/// like browser form restore, so a missing clear shows up as concatenation.
#[derive(Debug, Default)]
pub struct FakePage {
    responses: HashMap<String, String>,
    input_missing: bool,
    nav_delay: Option<Duration>,
    nav_error: Option<String>,
    state: Mutex<PageState>,
}

#[allow(dead_code)]
impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, typed: &str, html: impl Into<String>) -> Self {
        self.responses.insert(typed.to_string(), html.into());
        self
    }

    pub fn without_input(mut self) -> Self {
        self.input_missing = true;
        self
    }

    pub fn with_nav_delay(mut self, delay: Duration) -> Self {
        self.nav_delay = Some(delay);
        self
    }

    pub fn with_nav_error(mut self, message: &str) -> Self {
        self.nav_error = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn log(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl QueryPage for FakePage {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.log(format!("navigate {url}"));
        if let Some(delay) = self.nav_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.nav_error {
            return Err(anyhow!(message.clone()));
        }
        self.state.lock().unwrap().current = None;
        Ok(())
    }

    async fn element_exists(&self, selector: &str) -> bool {
        match selector {
            "#cedula" => !self.input_missing,
            ".card" => self
                .state
                .lock()
                .unwrap()
                .current
                .as_deref()
                .is_some_and(|html| html.contains("class=\"card\"")),
            _ => false,
        }
    }

    async fn clear_input(&self, selector: &str) -> Result<()> {
        self.log(format!("clear {selector}"));
        self.state.lock().unwrap().typed.clear();
        Ok(())
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.log(format!("type {selector} {text}"));
        self.state.lock().unwrap().typed.push_str(text);
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.log(format!("click {selector}"));
        let mut state = self.state.lock().unwrap();
        state.current = self.responses.get(&state.typed).cloned();
        Ok(())
    }

    async fn html(&self) -> Result<String> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .current
            .clone()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }
}

/// Page handle shared between the engine and the test body
#[derive(Debug, Clone)]
pub struct SharedPage(pub Arc<FakePage>);

#[async_trait]
impl QueryPage for SharedPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.0.navigate(url).await
    }

    async fn element_exists(&self, selector: &str) -> bool {
        self.0.element_exists(selector).await
    }

    async fn clear_input(&self, selector: &str) -> Result<()> {
        self.0.clear_input(selector).await
    }

    async fn type_into(&self, selector: &str, text: &str) -> Result<()> {
        self.0.type_into(selector, text).await
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.0.click(selector).await
    }

    async fn html(&self) -> Result<String> {
        self.0.html().await
    }
}

/// Engine that hands out one shared fake page
pub struct FakeEngine {
    page: Arc<FakePage>,
    page_fails: bool,
    pages_opened: Arc<AtomicUsize>,
    shut_down: Arc<AtomicBool>,
}

#[async_trait]
impl Engine for FakeEngine {
    type Page = SharedPage;

    async fn open_page(&self) -> Result<SharedPage> {
        if self.page_fails {
            return Err(anyhow!("target crashed"));
        }
        self.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(SharedPage(Arc::clone(&self.page)))
    }

    async fn shutdown(self) -> Result<()> {
        self.shut_down.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Launcher for `FakeEngine` with observable launch/shutdown counters
#[derive(Clone)]
pub struct FakeLauncher {
    pub page: Arc<FakePage>,
    pub launch_fails: bool,
    pub page_fails: bool,
    pub launches: Arc<AtomicUsize>,
    pub pages_opened: Arc<AtomicUsize>,
    pub shut_down: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self {
            page: Arc::new(page),
            launch_fails: false,
            page_fails: false,
            launches: Arc::new(AtomicUsize::new(0)),
            pages_opened: Arc::new(AtomicUsize::new(0)),
            shut_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn failing() -> Self {
        Self {
            launch_fails: true,
            ..Self::new(FakePage::new())
        }
    }

    pub fn with_failing_page(mut self) -> Self {
        self.page_fails = true;
        self
    }

    pub fn was_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineLauncher for FakeLauncher {
    type Engine = FakeEngine;

    async fn launch(&self) -> Result<FakeEngine, LaunchError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.launch_fails {
            return Err(LaunchError::Exhausted {
                attempts: 2,
                last: "chrome: not found".to_string(),
            });
        }
        Ok(FakeEngine {
            page: Arc::clone(&self.page),
            page_fails: self.page_fails,
            pages_opened: Arc::clone(&self.pages_opened),
            shut_down: Arc::clone(&self.shut_down),
        })
    }
}

/// In-memory sink; optionally fails on the write with the given 0-based index
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<CedulaRecord>,
    pub fail_at: Option<usize>,
}

impl RecordSink for MemorySink {
    fn write(&mut self, record: &CedulaRecord) -> Result<(), SinkError> {
        if self.fail_at == Some(self.records.len()) {
            return Err(SinkError::Io {
                path: "memory".into(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
