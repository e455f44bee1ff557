use super::*;

impl<R: RemoteGateway, M: MirrorStore> SyncCoordinator<R, M> {
    /// Loads the account profile with its derived subscription count and monthly spend.
    ///
    /// Derived fields are recomputed from the remote subscriptions on every remote read.
    pub async fn load_profile(&self) -> Result<UserProfile, SyncError> {
        let email = self.account.as_str();

        if !self.session().profile.needs_remote() {
            debug!(account = %self.account, "profile: reading from mirror");
            return self.mirror.find::<UserProfile>(email)?.ok_or_else(|| {
                SyncError::NotFound(format!("no mirrored profile for {}", email))
            });
        }

        let parsed = match self.remote.get_document(USERS, email).await? {
            Some(doc) => parse_user_document(email, &doc)?,
            None => UserDocument::default(),
        };
        let summary = compute_summary(&parsed.subscriptions);
        let profile = UserProfile {
            email: email.to_string(),
            full_name: parsed.full_name(),
            subscription_count: summary.count,
            monthly_spend: summary.monthly_spend,
        };

        match self.upsert(profile.clone()).and_then(|()| self.mirror.save()) {
            Ok(()) => self.session_guard().profile = CollectionState::Loaded,
            Err(err) => warn!(account = %self.account, error = %err, "mirror profile"),
        }
        Ok(profile)
    }

    /// Writes the `Name`/`Surname` account document right after registration.
    pub async fn create_account_document(
        &self,
        name: &str,
        surname: &str,
    ) -> Result<(), SyncError> {
        let (name, surname) = (name.trim(), surname.trim());
        if name.is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if surname.is_empty() {
            return Err(ValidationError::EmptyField("surname").into());
        }

        self.remote
            .set_document(USERS, self.account.as_str(), encode_account(name, surname), false)
            .await?;
        info!(account = %self.account, "account document created");

        self.session_guard().profile.invalidate();
        Ok(())
    }

    /// Drops the account's mirrored subscriptions and forgets what was loaded.
    ///
    /// A mirror failure is returned and leaves the session untouched.
    pub fn sign_out(&self) -> Result<(), SyncError> {
        {
            let _session = self.session_guard();
            self.subscriptions_load.cancel_current();
        }

        let removed = self.mirror.delete_all::<UserSubscription>()?;
        self.mirror.save()?;
        info!(account = %self.account, removed, "signed out; mirrored subscriptions cleared");

        self.session_guard().signed_out();
        Ok(())
    }
}
