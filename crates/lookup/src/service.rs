//! Cached registry service with atomic snapshot publication.
//!
//! # Purpose
//!
//! Own the process-wide registry cache and answer validation queries against
//! it. One service is constructed at startup and shared (typically behind an
//! `Arc`) with every request handler.
//!
//! # Mental model
//!
//! * Readers pin an `Arc<RegistryIndex>` and match against that immutable view.
//! * A reload parses the file into a new index and publishes it with a single
//!   atomic store; the previous index stays alive while anyone still holds it.
//! * At most one reload runs at a time. Everybody else either keeps using the
//!   snapshot they have or waits for the reload when there is none.
//!
//! # Invariants
//!
//! * Only successful loads are published. Failures are returned to the caller
//!   that attempted the load and leave no trace in the cache.
//! * A published index is never mutated.
//! * After winning the reload lock, freshness is checked again so queued
//!   callers do not reparse a file that was just loaded.
//!
//! # Concurrency & ordering
//!
//! * Fresh path: one `ArcSwapOption` load, no locking.
//! * Stale path with a reload already in flight: the caller is served the stale
//!   snapshot instead of blocking.
//! * Refresh in flight: the previous snapshot stays published and readers keep
//!   using it, fresh or stale, without waiting for the reload.
//! * Cold path (nothing cached): callers queue on the reload lock.
//!
//! # Failure modes & recovery
//!
//! * [`RegistryError`] from a load propagates out of [`RegistryService::validate`].
//!   The next call retries, so repairing the file is enough to recover.
//! * [`RegistryService::refresh`] reloads behind the published snapshot,
//!   logging and discarding errors. A failed refresh leaves the cache empty.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::matching::{ValidationResult, match_entries};
use crate::{RegistryConfig, RegistryError, RegistryIndex, SourceLocator};


struct CachedIndex {
	index: Arc<RegistryIndex>,
	loaded_at: Instant,
}

pub struct RegistryService {
	config: RegistryConfig,
	locator: SourceLocator,
	current: ArcSwapOption<CachedIndex>,
	reload: Mutex<()>,
}

impl std::fmt::Debug for RegistryService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RegistryService")
			.field("locator", &self.locator)
			.field("ttl", &self.config.ttl())
			.field("cached_source", &self.cached_source())
			.finish()
	}
}

impl RegistryService {
	/// Creates a service with an empty cache. Nothing is read until the first
	/// query or [`Self::refresh`].
	pub fn new(config: RegistryConfig) -> Self {
		Self {
			locator: config.locator(),
			config,
			current: ArcSwapOption::empty(),
			reload: Mutex::new(()),
		}
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Validates a claimed name against a registration number.
	///
	/// Loads or reloads the index first when the cache is empty or expired.
	pub fn validate(&self, name: &str, number: &str) -> Result<ValidationResult, RegistryError> {
		let index = self.snapshot()?;
		Ok(match_entries(&index, name, number, &self.config.particles))
	}

	/// Returns the current index, loading it if the cache is empty or expired.
	pub fn snapshot(&self) -> Result<Arc<RegistryIndex>, RegistryError> {
		let cached = self.current.load_full();
		if let Some(cached) = &cached
			&& self.is_fresh(cached)
		{
			return Ok(cached.index.clone());
		}

		let _guard = match self.reload.try_lock() {
			Some(guard) => guard,
			None => {
				if let Some(stale) = cached {
					debug!("CADASTUR reload in flight, serving previous snapshot");
					return Ok(stale.index.clone());
				}
				self.reload.lock()
			}
		};

		if let Some(cached) = self.current.load_full()
			&& self.is_fresh(&cached)
		{
			return Ok(cached.index.clone());
		}
		self.load_and_publish()
	}

	/// Reloads immediately, regardless of the cached index's age.
	///
	/// Readers keep the previous snapshot until the new one is published. On
	/// failure the cache is emptied and the error is logged and discarded; the
	/// next [`Self::validate`] attempts its own load and reports it.
	pub fn refresh(&self) {
		let _guard = self.reload.lock();
		match self.load_and_publish() {
			Ok(index) => info!(path = %index.source().display(), rows = index.total(), "CADASTUR cache refreshed"),
			Err(error) => {
				self.current.store(None);
				warn!(%error, code = error.code(), "CADASTUR refresh failed, next validation will retry");
			}
		}
	}

	/// Path of the file behind the cached index, if one is cached.
	pub fn cached_source(&self) -> Option<PathBuf> {
		self.current
			.load_full()
			.map(|cached| cached.index.source().to_path_buf())
	}

	/// Time since the cached index was loaded.
	pub fn cache_age(&self) -> Option<Duration> {
		self.current.load_full().map(|cached| cached.loaded_at.elapsed())
	}

	fn is_fresh(&self, cached: &CachedIndex) -> bool {
		cached.loaded_at.elapsed() < self.config.ttl()
	}

	/// Caller must hold `self.reload`.
	fn load_and_publish(&self) -> Result<Arc<RegistryIndex>, RegistryError> {
		let loaded = self
			.locator
			.locate()
			.and_then(|path| RegistryIndex::load(&path));
		let index = match loaded {
			Ok(index) => Arc::new(index),
			Err(error) => {
				warn!(%error, code = error.code(), "CADASTUR registry load failed");
				return Err(error);
			}
		};

		self.current.store(Some(Arc::new(CachedIndex {
			index: index.clone(),
			loaded_at: Instant::now(),
		})));
		Ok(index)
	}
}
