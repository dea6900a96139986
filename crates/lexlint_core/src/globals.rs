//! Recognized global identifiers, tagged by where they come from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier → origin.
pub type GlobalMap = BTreeMap<String, GlobalOrigin>;

/// Category a global identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalOrigin {
    /// Provided by the language standard.
    EcmaScript,
    /// Provided by web browsers.
    Browser,
    /// Provided by Node.js.
    NodeJs,
    /// Provided by the CouchDB query server.
    CouchDb,
    /// Console and dialog helpers for development.
    Development,
    /// Declared by the user, in configuration or a `/*global*/` directive.
    UserDefined,
}

impl GlobalOrigin {
    /// Built-in identifiers of this category.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            GlobalOrigin::EcmaScript => ECMASCRIPT,
            GlobalOrigin::Browser => BROWSER,
            GlobalOrigin::NodeJs => NODEJS,
            GlobalOrigin::CouchDb => COUCHDB,
            GlobalOrigin::Development => DEVELOPMENT,
            GlobalOrigin::UserDefined => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GlobalOrigin::EcmaScript => "ECMAScript",
            GlobalOrigin::Browser => "browser",
            GlobalOrigin::NodeJs => "Node.js",
            GlobalOrigin::CouchDb => "CouchDb",
            GlobalOrigin::Development => "development",
            GlobalOrigin::UserDefined => "user-defined",
        }
    }
}

impl fmt::Display for GlobalOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inserts every name of `origin`, replacing earlier categories.
pub fn overlay(globals: &mut GlobalMap, origin: GlobalOrigin) {
    overlay_names(globals, origin.names().iter().copied(), origin);
}

/// Inserts `names` tagged with `origin`, replacing earlier categories.
pub fn overlay_names<'a>(
    globals: &mut GlobalMap,
    names: impl IntoIterator<Item = &'a str>,
    origin: GlobalOrigin,
) {
    for name in names {
        globals.insert(name.to_string(), origin);
    }
}

const ECMASCRIPT: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "Float32Array",
    "Float64Array",
    "Function",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "NaN",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakSet",
    "WebAssembly",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "eval",
    "globalThis",
    "import",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    "undefined",
];

const BROWSER: &[&str] = &[
    "AbortController",
    "DOMException",
    "Event",
    "EventTarget",
    "FileReader",
    "FormData",
    "IntersectionObserver",
    "MessageChannel",
    "MessageEvent",
    "MessagePort",
    "MutationObserver",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "WebAssembly",
    "Worker",
    "XMLHttpRequest",
    "clearInterval",
    "clearTimeout",
    "document",
    "fetch",
    "importScripts",
    "indexedDb",
    "localStorage",
    "location",
    "navigator",
    "performance",
    "queueMicrotask",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "structuredClone",
    "window",
];

const NODEJS: &[&str] = &[
    "AbortController",
    "Buffer",
    "DOMException",
    "Event",
    "EventTarget",
    "MessageChannel",
    "MessageEvent",
    "MessagePort",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "WebAssembly",
    "__dirname",
    "__filename",
    "clearImmediate",
    "clearInterval",
    "clearTimeout",
    "console",
    "exports",
    "global",
    "module",
    "performance",
    "process",
    "queueMicrotask",
    "require",
    "setImmediate",
    "setInterval",
    "setTimeout",
    "structuredClone",
];

const COUCHDB: &[&str] = &[
    "emit",
    "getRow",
    "isArray",
    "log",
    "provides",
    "registerType",
    "require",
    "send",
    "start",
    "sum",
    "toJSON",
];

const DEVELOPMENT: &[&str] = &["alert", "confirm", "console", "prompt"];
