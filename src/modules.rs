//! Module inference
//!
//! Derives a module → path-prefix mapping from the archive's entry paths:
//! one module per top-level `assets/` directory, one per native library
//! base name under `lib/<abi>/`.

use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Suffix identifying native libraries under `lib/<abi>/`
const NATIVE_LIB_SUFFIX: &str = ".so";

/// Conventional prefix of native library file names (`libfoo.so`)
const NATIVE_LIB_PREFIX: &str = "lib";

/// Classification of a size row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModuleKind {
    /// Entries under one `assets/<name>/` directory
    Asset,
    /// One native library across all ABIs
    Library,
    /// Residual: every byte not attributed to a declared module
    App,
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => write!(f, "Asset"),
            Self::Library => write!(f, "Library"),
            Self::App => write!(f, "App"),
        }
    }
}

/// Inferred mapping from module name to its sorted set of path prefixes
///
/// The App residual is implicit and carries no prefixes.
#[derive(Debug, Clone, Default)]
pub struct ModuleMap {
    /// Module name → sorted, deduplicated path prefixes
    pub modules: BTreeMap<String, BTreeSet<String>>,
    /// Names classified as [`ModuleKind::Asset`]
    pub asset_keys: BTreeSet<String>,
    /// Names classified as [`ModuleKind::Library`]
    pub library_keys: BTreeSet<String>,
}

impl ModuleMap {
    /// Kind of the named module; unknown names fall through to App.
    pub fn kind_of(&self, name: &str) -> ModuleKind {
        if self.asset_keys.contains(name) {
            ModuleKind::Asset
        } else if self.library_keys.contains(name) {
            ModuleKind::Library
        } else {
            ModuleKind::App
        }
    }
}

/// Module key for a native library file name: `libfoo.so` → `foo`.
///
/// The `.so` suffix always goes; the conventional `lib` prefix goes too
/// unless that would leave an empty key (`lib.so` stays `lib`).
fn library_key(libname: &str) -> String {
    let base = libname.trim_end_matches(NATIVE_LIB_SUFFIX);
    match base.strip_prefix(NATIVE_LIB_PREFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => base.to_string(),
    }
}

/// Infer modules from archive entry paths.
///
/// `scope_prefix` narrows inference to a sub-archive root (an AAB base
/// module, for instance); pass `""` to scan the whole archive. Registered
/// prefixes are always archive-relative (`assets/…`, `lib/…`) regardless of
/// the scope.
///
/// Asset modules group by the first segment after `assets/`; library modules
/// group by library base name, one prefix per `lib/<abi>/<libname>` path.
/// When an asset key and a library key collide, both survive under
/// kind-qualified names (`<key> (assets)` and `<key> (lib)`) so that neither
/// group's bytes are dropped.
pub fn infer_modules<'a, I>(paths: I, scope_prefix: &str) -> ModuleMap
where
    I: IntoIterator<Item = &'a str>,
{
    let assets_root = format!("{scope_prefix}assets/");
    let lib_root = format!("{scope_prefix}lib/");

    let mut asset_mods: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut lib_mods: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for path in paths {
        if let Some(rest) = path.strip_prefix(&assets_root) {
            // First segment after assets/ names the module; bare files
            // directly in assets/ stay in the App residual.
            if let Some((key, _)) = rest.split_once('/') {
                asset_mods
                    .entry(key.to_string())
                    .or_default()
                    .insert(format!("assets/{key}/"));
            }
        } else if let Some(rest) = path.strip_prefix(&lib_root) {
            if !path.ends_with(NATIVE_LIB_SUFFIX) {
                continue;
            }
            // lib/<abi>/<libname>: anything shallower is not a library.
            if let Some((abi, libname)) = rest.split_once('/') {
                if libname.is_empty() || libname.contains('/') {
                    continue;
                }
                lib_mods
                    .entry(library_key(libname))
                    .or_default()
                    .insert(format!("lib/{abi}/{libname}"));
            }
        }
    }

    let mut map = ModuleMap::default();

    let colliding: BTreeSet<String> = asset_mods
        .keys()
        .filter(|k| lib_mods.contains_key(*k))
        .cloned()
        .collect();
    for key in &colliding {
        warn!("module key '{key}' exists as both asset and library; keeping both");
    }

    for (key, prefixes) in asset_mods {
        let name = if colliding.contains(&key) {
            format!("{key} (assets)")
        } else {
            key
        };
        map.asset_keys.insert(name.clone());
        map.modules.insert(name, prefixes);
    }
    for (key, prefixes) in lib_mods {
        let name = if colliding.contains(&key) {
            format!("{key} (lib)")
        } else {
            key
        };
        map.library_keys.insert(name.clone());
        map.modules.insert(name, prefixes);
    }

    debug!(
        "inferred {} modules ({} asset, {} library)",
        map.modules.len(),
        map.asset_keys.len(),
        map.library_keys.len()
    );

    map
}
