//! Static catalog mapping extension API call signatures to the permission
//! they require.
//!
//! Signatures are namespace-less (`tabs.query`, not `chrome.tabs.query`);
//! the scanner matches them under both the `chrome.` and `browser.`
//! namespaces. The table is built once at process start and never mutated.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// One catalog row: an API call signature and the permission it requires.
/// `None` means the API is available without any declared permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub signature: &'static str,
    pub required_permission: Option<&'static str>,
}

/// Result of a catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The API requires this declared permission.
    Requires(&'static str),
    /// The API is universally available; no permission needed.
    NoPermission,
    /// Not in the catalog. Excluded from permission derivation.
    Unknown,
}

// Documented WebExtension API methods, tagged with the manifest permission
// that gates them. APIs available without any grant (messaging, i18n,
// basic tabs/windows/action operations) are tagged None.
const ENTRIES: &[(&str, Option<&str>)] = &[
    // storage.*
    ("storage.local.get", Some("storage")),
    ("storage.local.set", Some("storage")),
    ("storage.local.remove", Some("storage")),
    ("storage.local.clear", Some("storage")),
    ("storage.sync.get", Some("storage")),
    ("storage.sync.set", Some("storage")),
    ("storage.sync.remove", Some("storage")),
    ("storage.sync.clear", Some("storage")),
    ("storage.session.get", Some("storage")),
    ("storage.session.set", Some("storage")),
    ("storage.session.remove", Some("storage")),
    ("storage.managed.get", Some("storage")),
    ("storage.onChanged.addListener", Some("storage")),
    // cookies.*
    ("cookies.get", Some("cookies")),
    ("cookies.getAll", Some("cookies")),
    ("cookies.set", Some("cookies")),
    ("cookies.remove", Some("cookies")),
    ("cookies.onChanged.addListener", Some("cookies")),
    // history.*
    ("history.search", Some("history")),
    ("history.getVisits", Some("history")),
    ("history.addUrl", Some("history")),
    ("history.deleteUrl", Some("history")),
    ("history.deleteAll", Some("history")),
    // bookmarks.*
    ("bookmarks.get", Some("bookmarks")),
    ("bookmarks.getTree", Some("bookmarks")),
    ("bookmarks.search", Some("bookmarks")),
    ("bookmarks.create", Some("bookmarks")),
    ("bookmarks.update", Some("bookmarks")),
    ("bookmarks.remove", Some("bookmarks")),
    // downloads.*
    ("downloads.download", Some("downloads")),
    ("downloads.search", Some("downloads")),
    ("downloads.cancel", Some("downloads")),
    ("downloads.open", Some("downloads")),
    ("downloads.erase", Some("downloads")),
    // notifications.*
    ("notifications.create", Some("notifications")),
    ("notifications.update", Some("notifications")),
    ("notifications.clear", Some("notifications")),
    ("notifications.getAll", Some("notifications")),
    // webRequest.*
    ("webRequest.onBeforeRequest.addListener", Some("webRequest")),
    ("webRequest.onBeforeSendHeaders.addListener", Some("webRequest")),
    ("webRequest.onHeadersReceived.addListener", Some("webRequest")),
    ("webRequest.onCompleted.addListener", Some("webRequest")),
    ("webRequest.onErrorOccurred.addListener", Some("webRequest")),
    // webNavigation.*
    ("webNavigation.onCommitted.addListener", Some("webNavigation")),
    ("webNavigation.onCompleted.addListener", Some("webNavigation")),
    ("webNavigation.getAllFrames", Some("webNavigation")),
    // scripting.*
    ("scripting.executeScript", Some("scripting")),
    ("scripting.insertCSS", Some("scripting")),
    ("scripting.removeCSS", Some("scripting")),
    ("scripting.registerContentScripts", Some("scripting")),
    // alarms.*
    ("alarms.create", Some("alarms")),
    ("alarms.get", Some("alarms")),
    ("alarms.getAll", Some("alarms")),
    ("alarms.clear", Some("alarms")),
    ("alarms.clearAll", Some("alarms")),
    ("alarms.onAlarm.addListener", Some("alarms")),
    // contextMenus.*
    ("contextMenus.create", Some("contextMenus")),
    ("contextMenus.update", Some("contextMenus")),
    ("contextMenus.remove", Some("contextMenus")),
    ("contextMenus.removeAll", Some("contextMenus")),
    // tabs.* requiring the "tabs" permission (privileged tab metadata)
    ("tabs.captureVisibleTab", Some("tabs")),
    // idle / management / sessions / topSites / browsingData
    ("idle.queryState", Some("idle")),
    ("idle.setDetectionInterval", Some("idle")),
    ("management.getAll", Some("management")),
    ("management.get", Some("management")),
    ("management.setEnabled", Some("management")),
    ("sessions.getRecentlyClosed", Some("sessions")),
    ("sessions.restore", Some("sessions")),
    ("topSites.get", Some("topSites")),
    ("browsingData.remove", Some("browsingData")),
    ("browsingData.removeCache", Some("browsingData")),
    ("browsingData.removeCookies", Some("browsingData")),
    // identity / proxy
    ("identity.getAuthToken", Some("identity")),
    ("identity.launchWebAuthFlow", Some("identity")),
    ("identity.getProfileUserInfo", Some("identity")),
    ("proxy.settings.set", Some("proxy")),
    ("proxy.settings.get", Some("proxy")),
    // declarativeNetRequest / tabGroups / sidePanel / offscreen
    ("declarativeNetRequest.updateDynamicRules", Some("declarativeNetRequest")),
    ("declarativeNetRequest.getDynamicRules", Some("declarativeNetRequest")),
    ("declarativeNetRequest.updateSessionRules", Some("declarativeNetRequest")),
    ("tabGroups.get", Some("tabGroups")),
    ("tabGroups.query", Some("tabGroups")),
    ("tabGroups.update", Some("tabGroups")),
    ("sidePanel.open", Some("sidePanel")),
    ("sidePanel.setOptions", Some("sidePanel")),
    ("offscreen.createDocument", Some("offscreen")),
    ("offscreen.closeDocument", Some("offscreen")),
    // Universally available: basic tabs/windows operations
    ("tabs.query", None),
    ("tabs.create", None),
    ("tabs.update", None),
    ("tabs.remove", None),
    ("tabs.reload", None),
    ("tabs.sendMessage", None),
    ("tabs.onUpdated.addListener", None),
    ("tabs.onActivated.addListener", None),
    ("windows.create", None),
    ("windows.get", None),
    ("windows.getAll", None),
    ("windows.update", None),
    // Universally available: messaging and runtime
    ("runtime.sendMessage", None),
    ("runtime.onMessage.addListener", None),
    ("runtime.connect", None),
    ("runtime.onConnect.addListener", None),
    ("runtime.getURL", None),
    ("runtime.getManifest", None),
    ("runtime.openOptionsPage", None),
    // Universally available: i18n, action, commands, permissions API
    ("i18n.getMessage", None),
    ("i18n.getUILanguage", None),
    ("action.setBadgeText", None),
    ("action.setBadgeBackgroundColor", None),
    ("action.setIcon", None),
    ("action.setTitle", None),
    ("action.setPopup", None),
    ("action.onClicked.addListener", None),
    ("commands.onCommand.addListener", None),
    ("permissions.request", None),
    ("permissions.contains", None),
    ("permissions.remove", None),
];

/// The process-wide API catalog. Read-only after construction.
#[derive(Debug)]
pub struct ApiCatalog {
    index: HashMap<&'static str, Option<&'static str>>,
}

lazy_static! {
    static ref CATALOG: ApiCatalog = ApiCatalog::build();
}

impl ApiCatalog {
    fn build() -> Self {
        let index = ENTRIES.iter().copied().collect();
        Self { index }
    }

    /// The shared catalog instance.
    pub fn global() -> &'static ApiCatalog {
        &CATALOG
    }

    pub fn lookup(&self, signature: &str) -> Lookup {
        match self.index.get(signature) {
            Some(Some(permission)) => Lookup::Requires(permission),
            Some(None) => Lookup::NoPermission,
            None => Lookup::Unknown,
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> {
        ENTRIES.iter().map(|&(signature, required_permission)| CatalogEntry {
            signature,
            required_permission,
        })
    }

    /// All signatures, sorted. Used by the CLI catalog listing.
    pub fn signatures(&self) -> Vec<&'static str> {
        let mut paths: Vec<&'static str> = self.index.keys().copied().collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
