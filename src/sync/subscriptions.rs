use super::*;

#[derive(Clone, Debug, PartialEq)]
pub enum SubscriptionMutation {
    Add(UserSubscription),
    Edit(UserSubscription),
    Remove { service_name: String },
}

impl SubscriptionMutation {
    pub fn service_name(&self) -> &str {
        match self {
            SubscriptionMutation::Add(sub) | SubscriptionMutation::Edit(sub) => &sub.service_name,
            SubscriptionMutation::Remove { service_name } => service_name,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SubscriptionMutation::Add(_) => "add",
            SubscriptionMutation::Edit(_) => "edit",
            SubscriptionMutation::Remove { .. } => "remove",
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name().trim().is_empty() {
            return Err(ValidationError::EmptyServiceName);
        }
        if let SubscriptionMutation::Add(sub) | SubscriptionMutation::Edit(sub) = self {
            if sub.person_count < 1 {
                return Err(ValidationError::InvalidPersonCount(i64::from(sub.person_count)));
            }
            if !sub.plan_price.is_finite() || sub.plan_price < 0.0 {
                return Err(ValidationError::InvalidPrice(sub.plan_price.to_string()));
            }
        }
        Ok(())
    }
}

fn subscriptions_map(doc: &Document) -> Option<&Document> {
    doc.get(FIELD_SUBSCRIPTIONS).and_then(Value::as_object)
}

impl<R: RemoteGateway, M: MirrorStore> SyncCoordinator<R, M> {
    /// Loads the account's subscriptions.
    ///
    /// Reads the remote when the collection is not loaded or was changed since, inserting
    /// subscriptions the mirror does not know yet; otherwise reads the mirror. Starting a
    /// new load cancels one still in flight, which then returns [`SyncError::Cancelled`].
    pub async fn load_user_subscriptions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<UserSubscription>, SyncError> {
        let ticket = self.subscriptions_load.begin(cancel);

        if !self.session().subscriptions.needs_remote() {
            debug!(account = %self.account, "subscriptions: reading from mirror");
            return Ok(self.mirror.query::<UserSubscription>(QueryOrder::ByKey)?);
        }

        let key = self.account.as_str();
        let doc = cancellable(&ticket.token, self.remote.get_document(USERS, key)).await??;
        let subs = match doc {
            Some(doc) => parse_user_document(key, &doc)?.subscriptions,
            None => {
                debug!(account = %self.account, "no account document; treating as empty");
                Vec::new()
            }
        };

        // Mutations cancel in-flight loads under the session lock, so a load that is still
        // live here commits before any later mutation replays on the mirror.
        let mut session = self.session_guard();
        if ticket.token.is_cancelled() {
            return Err(SyncError::Cancelled);
        }
        match self.mirror_new_records(&subs) {
            Ok(inserted) => {
                info!(
                    account = %self.account,
                    fetched = subs.len(),
                    inserted,
                    "subscriptions loaded from remote"
                );
                session.subscriptions = CollectionState::Loaded;
            }
            Err(err) => warn!(
                account = %self.account,
                error = %err,
                "subscriptions mirror incomplete; next load reads remote"
            ),
        }
        Ok(subs)
    }

    /// Applies a subscription change to the remote, then replays it on the mirror.
    ///
    /// On remote failure nothing local is touched. Concurrent writers are not reconciled:
    /// the last write to the account document wins.
    pub async fn mutate_subscription(
        &self,
        mutation: SubscriptionMutation,
    ) -> Result<(), SyncError> {
        mutation.validate()?;

        match &mutation {
            SubscriptionMutation::Add(sub) => self.remote_add(sub).await?,
            SubscriptionMutation::Edit(sub) => self.remote_edit(sub).await?,
            SubscriptionMutation::Remove { service_name } => {
                self.remote_remove(service_name).await?
            }
        }
        info!(
            account = %self.account,
            op = mutation.label(),
            service = mutation.service_name(),
            "subscription change confirmed by remote"
        );

        // A load that read the account document before this write must not commit it.
        {
            let _session = self.session_guard();
            self.subscriptions_load.cancel_current();
        }

        if let Err(err) = self.replay_on_mirror(&mutation) {
            warn!(
                op = mutation.label(),
                service = mutation.service_name(),
                error = %err,
                "mirror replay failed; remote state stays authoritative"
            );
        }

        self.session_guard().subscriptions_changed();
        Ok(())
    }

    async fn remote_add(&self, sub: &UserSubscription) -> Result<(), SyncError> {
        let key = self.account.as_str();
        let existing = self.remote.get_document(USERS, key).await?;

        let mut subscriptions = existing
            .as_ref()
            .and_then(subscriptions_map)
            .cloned()
            .unwrap_or_default();
        subscriptions.insert(sub.service_name.clone(), encode_subscription(sub));

        let mut update = Document::new();
        update.insert(FIELD_SUBSCRIPTIONS.to_string(), Value::Object(subscriptions));
        self.remote.set_document(USERS, key, update, true).await?;
        Ok(())
    }

    async fn remote_edit(&self, sub: &UserSubscription) -> Result<(), SyncError> {
        let key = self.account.as_str();
        let Some(doc) = self.remote.get_document(USERS, key).await? else {
            return Err(SyncError::NotFound(
                "no subscriptions found or account document does not exist".to_string(),
            ));
        };

        let mut subscriptions = subscriptions_map(&doc).cloned().unwrap_or_default();
        let Some(Value::Object(details)) = subscriptions.get_mut(&sub.service_name) else {
            return Err(SyncError::NotFound(format!(
                "service {:?} not found in account subscriptions",
                sub.service_name
            )));
        };
        if let Value::Object(fields) = encode_subscription(sub) {
            merge_documents(details, fields);
        }

        self.remote
            .update_field(
                USERS,
                key,
                &FieldPath::new([FIELD_SUBSCRIPTIONS]),
                FieldUpdate::Set(Value::Object(subscriptions)),
            )
            .await?;
        Ok(())
    }

    async fn remote_remove(&self, service_name: &str) -> Result<(), SyncError> {
        let key = self.account.as_str();
        let subscribed = self
            .remote
            .get_document(USERS, key)
            .await?
            .as_ref()
            .and_then(subscriptions_map)
            .is_some_and(|m| m.contains_key(service_name));
        if !subscribed {
            return Err(SyncError::NotFound(format!(
                "service {:?} not found in account subscriptions",
                service_name
            )));
        }

        self.remote
            .update_field(
                USERS,
                key,
                &FieldPath::new([FIELD_SUBSCRIPTIONS, service_name]),
                FieldUpdate::Delete,
            )
            .await?;
        Ok(())
    }

    fn replay_on_mirror(&self, mutation: &SubscriptionMutation) -> Result<(), MirrorError> {
        match mutation {
            SubscriptionMutation::Add(sub) => match self.mirror.insert(sub.clone()) {
                Err(MirrorError::DuplicateKey { .. }) => self.mirror.update(sub.clone())?,
                other => other?,
            },
            SubscriptionMutation::Edit(sub) => self.upsert(sub.clone())?,
            SubscriptionMutation::Remove { service_name } => {
                match self.mirror.delete::<UserSubscription>(service_name) {
                    Err(MirrorError::Missing { .. }) => {}
                    other => other?,
                }
            }
        }
        self.mirror.save()
    }
}
