//! Lifecycle operations.
//!
//! Encrypt, decrypt, and revision check.

use tracing::{debug, info, warn};

use super::{Event, Project, RevisionStatus};
use crate::core::cipher;
use crate::core::files::FileEntry;
use crate::core::fingerprint::{self, Cache};
use crate::core::hooks::HookPoint;
use crate::core::revision;
use crate::error::Result;

impl Project {
    /// Encrypt every listed file whose plaintext changed.
    ///
    /// A file is skipped when its fingerprint matches the last recorded
    /// one and the encrypted file exists, unless `--force` is given. The
    /// shared revision is bumped once if anything was written.
    ///
    /// # Returns
    ///
    /// Number of files encrypted.
    ///
    /// # Errors
    ///
    /// Returns error on an empty file list, a hook failure, or the first
    /// file that fails; the remaining files are not processed, while the
    /// files already written are recorded and bump the revision.
    pub fn encrypt(&self) -> Result<usize> {
        self.validate()?;
        self.run_point(HookPoint::PreEncrypt)?;

        let files = self.lister.list(&self.config)?;
        let mut cache = Cache::load(&self.config.cache_file());
        let mut count = 0;

        let result = self.encrypt_each(&files, &mut cache, &mut count);

        // Record whatever was written, even when a later file failed.
        cache.save()?;
        if count > 0 {
            let revision = revision::bump(&self.config)?;
            info!(files = count, revision, "encrypted");
        }
        result?;

        self.reporter.report(Event::EncryptFinished { count });
        self.run_point(HookPoint::PostEncrypt)?;
        Ok(count)
    }

    fn encrypt_each(
        &self,
        files: &[FileEntry],
        cache: &mut Cache,
        count: &mut usize,
    ) -> Result<()> {
        let force = self.config.force();

        for entry in files {
            if !entry.decrypted.full.exists() {
                warn!(file = %entry.decrypted.rel, "plaintext missing, not encrypting");
                continue;
            }

            let fingerprint = fingerprint::of_file(&entry.key, &entry.decrypted.full)?;

            if !force
                && entry.encrypted.full.exists()
                && cache.matches(&entry.decrypted.rel, &fingerprint)
            {
                debug!(file = %entry.decrypted.rel, "unchanged, skipping");
                self.reporter.report(Event::Unchanged(entry));
                self.run_point(HookPoint::EncryptSkipped)?;
                continue;
            }

            cipher::encrypt_file(self.cipher.as_ref(), entry)?;
            cache.record(&entry.decrypted.rel, fingerprint);
            self.reporter.report(Event::Encrypted(entry));
            *count += 1;
        }

        Ok(())
    }

    /// Decrypt every listed file and align the local revision.
    ///
    /// The local revision is left alone when nothing was decrypted.
    ///
    /// # Returns
    ///
    /// Number of files decrypted.
    ///
    /// # Errors
    ///
    /// Returns error on an empty file list, a hook failure, or the first
    /// file that fails; a wrong key surfaces as `Error::Crypto`.
    pub fn decrypt(&self) -> Result<usize> {
        self.validate()?;
        self.run_point(HookPoint::PreDecrypt)?;

        let files = self.lister.list(&self.config)?;
        let mut cache = Cache::load(&self.config.cache_file());
        let mut count = 0;

        for entry in &files {
            if !entry.encrypted.full.exists() {
                warn!(file = %entry.encrypted.rel, "encrypted file missing, not decrypting");
                continue;
            }

            cipher::decrypt_file(self.cipher.as_ref(), entry)?;
            cache.record(
                &entry.decrypted.rel,
                fingerprint::of_file(&entry.key, &entry.decrypted.full)?,
            );
            self.reporter.report(Event::Decrypted(entry));
            count += 1;
        }

        cache.save()?;
        if count > 0 {
            let revision = revision::sync_local(&self.config)?;
            info!(files = count, revision, "decrypted");
        }

        self.reporter.report(Event::DecryptFinished { count });
        self.run_point(HookPoint::PostDecrypt)?;
        Ok(count)
    }

    /// Compare the local revision to the shared one.
    ///
    /// When outdated and `--decrypt` is given, decrypts everything.
    ///
    /// # Errors
    ///
    /// Returns error if a revision file is malformed, a hook fails, or the
    /// requested decrypt fails.
    pub fn revision_check(&self) -> Result<RevisionStatus> {
        self.run_point(HookPoint::PreRevisionCheck)?;

        if !revision::is_outdated(&self.config)? {
            self.run_point(HookPoint::PostRevisionCheck)?;
            return Ok(RevisionStatus::UpToDate);
        }

        let decrypting = self.config.args.is_set("decrypt");
        self.reporter.report(Event::Outdated { decrypting });
        self.run_point(HookPoint::RevisionOutdated)?;

        if decrypting {
            self.decrypt()?;
        }

        self.run_point(HookPoint::PostRevisionCheck)?;
        Ok(RevisionStatus::Outdated)
    }
}
