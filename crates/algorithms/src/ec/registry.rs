//! OID-keyed table of known curves

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use eccrypt_api::error::{Error, Result};
use eccrypt_params::curves::BUILTIN_CURVES;
use once_cell::sync::Lazy;
use tracing::debug;

use super::curve::Curve;
use crate::encoding::Oid;

static SHARED: Lazy<CurveRegistry> = Lazy::new(CurveRegistry::with_builtins);

#[derive(Default)]
struct Inner {
    by_oid: HashMap<Oid, Arc<Curve>>,
    // registration order, for stable diagnostics
    order: Vec<Arc<Curve>>,
}

/// Append-only curve registry
///
/// Lookups take a read lock and may run concurrently; registrations are
/// serialized behind the write lock. Curves are keyed by their full OID.
#[derive(Default)]
pub struct CurveRegistry {
    inner: RwLock<Inner>,
}

impl CurveRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in curves, secp256k1 and prime256v1
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        {
            let mut inner = registry.inner.write().unwrap_or_else(PoisonError::into_inner);
            for params in BUILTIN_CURVES {
                let curve = Arc::new(Curve::from_params(params));
                inner.by_oid.insert(curve.oid().clone(), Arc::clone(&curve));
                inner.order.push(curve);
            }
        }
        registry
    }

    /// Process-wide registry, built with the built-in curves on first use
    pub fn shared() -> &'static CurveRegistry {
        &SHARED
    }

    /// Add a curve; an OID that is already taken is rejected
    pub fn register(&self, curve: Curve) -> Result<Arc<Curve>> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.by_oid.contains_key(curve.oid()) {
            debug!(curve = curve.name(), oid = %curve.oid(), "duplicate curve registration");
            return Err(Error::DuplicateCurve {
                oid: curve.oid().components().to_vec(),
                name: curve.name().to_string(),
            });
        }
        let curve = Arc::new(curve);
        inner.by_oid.insert(curve.oid().clone(), Arc::clone(&curve));
        inner.order.push(Arc::clone(&curve));
        debug!(curve = curve.name(), oid = %curve.oid(), "registered curve");
        Ok(curve)
    }

    /// Find the curve with exactly this OID
    pub fn lookup(&self, oid: &Oid) -> Result<Arc<Curve>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(curve) = inner.by_oid.get(oid) {
            return Ok(Arc::clone(curve));
        }
        debug!(oid = %oid, "unknown curve oid");
        Err(Error::UnknownCurve {
            oid: oid.components().to_vec(),
            known: inner.order.iter().map(|c| c.name().to_string()).collect(),
        })
    }

    /// Find a curve by name or NIST name
    ///
    /// Matching ignores ASCII case and dashes, so `P-256` and `p256` both
    /// find prime256v1.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<Curve>> {
        let wanted = normalize(name);
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .order
            .iter()
            .find(|c| {
                normalize(c.name()) == wanted
                    || c.nist_name().map_or(false, |n| normalize(n) == wanted)
            })
            .cloned()
    }

    /// Registered curve names, in registration order
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.order.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
