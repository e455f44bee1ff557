use super::*;

impl<R: RemoteGateway, M: MirrorStore> SyncCoordinator<R, M> {
    /// Loads the service catalog.
    ///
    /// The remote is read once per session; afterwards the mirror answers without any
    /// remote call. A failed remote read, or a mirror that could not take the fetched rows,
    /// leaves the catalog unloaded.
    pub async fn load_catalog(&self) -> Result<Vec<Service>, SyncError> {
        if !self.session().catalog.needs_remote() {
            debug!("catalog: reading from mirror");
            return Ok(self.mirror.query::<Service>(QueryOrder::ByKey)?);
        }

        let docs = self.remote.list_documents(SERVICES).await?;
        let services = docs
            .iter()
            .map(|(key, doc)| parse_service_document(key, doc))
            .collect::<Result<Vec<_>, _>>()?;

        match self.mirror_new_records(&services) {
            Ok(inserted) => {
                info!(fetched = services.len(), inserted, "catalog loaded from remote");
                self.session_guard().catalog = CollectionState::Loaded;
            }
            Err(err) => warn!(
                table = %Service::TABLE,
                error = %err,
                "catalog mirror incomplete; next load reads remote"
            ),
        }
        Ok(services)
    }

    /// Plans of one catalog service, cheapest first. Always read from the remote.
    pub async fn load_plans(&self, service_name: &str) -> Result<Vec<Plan>, SyncError> {
        let Some(doc) = self.remote.get_document(SERVICES, service_name).await? else {
            return Err(SyncError::NotFound(format!(
                "service {:?} not found in catalog",
                service_name
            )));
        };
        Ok(parse_plans(service_name, &doc)?)
    }
}
