//! Shared page fixture for unit tests: a memory document wired to fake host
//! services on a virtual clock.

use std::rc::Rc;

use crate::config::PageConfig;
use crate::dom::memory::MemoryDom;
use crate::error::ClipboardError;
use crate::host::{Host, ManualScheduler, MemoryStorage, ScriptedDialogs, StubClipboard};
use crate::page::Page;

/// 2024-03-01T12:00:00Z
pub const EPOCH_MS: f64 = 1_709_294_400_000.0;

pub struct Fixture {
    pub page: Rc<Page<MemoryDom>>,
    pub scheduler: Rc<ManualScheduler>,
    pub storage: Rc<MemoryStorage>,
    pub dialogs: Rc<ScriptedDialogs>,
    pub clipboard: Rc<StubClipboard>,
}

pub struct FixtureBuilder {
    dom: MemoryDom,
    config: PageConfig,
    storage: MemoryStorage,
    dialogs: ScriptedDialogs,
    clipboard: StubClipboard,
}

impl FixtureBuilder {
    pub fn config(mut self, config: PageConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage(mut self, storage: MemoryStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn dialogs(mut self, dialogs: ScriptedDialogs) -> Self {
        self.dialogs = dialogs;
        self
    }

    pub fn failing_clipboard(mut self, error: ClipboardError) -> Self {
        self.clipboard = StubClipboard::failing(error);
        self
    }

    /// Build the page without running `init`.
    pub fn build(self) -> Fixture {
        let scheduler = Rc::new(ManualScheduler::starting_at(EPOCH_MS));
        let storage = Rc::new(self.storage);
        let dialogs = Rc::new(self.dialogs);
        let clipboard = Rc::new(self.clipboard);
        let host = Host {
            storage: storage.clone(),
            dialogs: dialogs.clone(),
            clipboard: clipboard.clone(),
            scheduler: scheduler.clone(),
            clock: scheduler.clone(),
        };
        let page = Page::new(self.dom, self.config, host);
        Fixture { page, scheduler, storage, dialogs, clipboard }
    }

    /// Build the page and run `init`.
    pub fn start(self) -> Fixture {
        let fixture = self.build();
        fixture.page.init();
        fixture
    }
}

impl Fixture {
    pub fn with(dom: MemoryDom) -> FixtureBuilder {
        FixtureBuilder {
            dom,
            config: PageConfig::default(),
            storage: MemoryStorage::new(),
            dialogs: ScriptedDialogs::accepting(),
            clipboard: StubClipboard::working(),
        }
    }

    pub fn dom(&self) -> &MemoryDom {
        self.page.dom()
    }

    pub fn advance(&self, ms: u64) {
        self.scheduler.advance(ms);
    }
}
