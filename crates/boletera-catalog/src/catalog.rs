use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use boletera_core::{TICKETS_KEY, Ticket, TicketPayload, folio_span, ticket_code};

use crate::encoder::PayloadEncoder;
use crate::model::{CatalogMetrics, GenerateRequest};
use crate::store::PersistenceAdapter;

/// Owner of the ordered ticket collection.
///
/// The catalog is insertion-order-significant: new batches are prepended, so
/// the most recent generation round appears first. Every mutation mirrors
/// the full state into the persistence adapter; save failures are logged and
/// swallowed.
pub struct TicketCatalog {
    tickets: Vec<Ticket>,
    store: Arc<dyn PersistenceAdapter>,
    encoder: Box<dyn PayloadEncoder>,
}

impl TicketCatalog {
    /// Replay persisted state. A missing or undecodable key yields an empty
    /// catalog rather than an error.
    pub fn load(store: Arc<dyn PersistenceAdapter>, encoder: Box<dyn PayloadEncoder>) -> Self {
        let tickets = match store.load(TICKETS_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Ticket>>(&raw) {
                Ok(tickets) => tickets,
                Err(err) => {
                    warn!(event = "catalog_state_invalid", error = %err, "starting with an empty catalog");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Self {
            tickets,
            store,
            encoder,
        }
    }

    /// Synthesize one batch of tickets.
    ///
    /// Folios count up from `request.start_folio`; payload encoding is
    /// attempted independently per ticket and a failure leaves that ticket
    /// with an empty image. The new batch is prepended to the catalog in
    /// increasing-folio order and the updated state is persisted.
    pub async fn generate(&mut self, request: &GenerateRequest) -> Vec<Ticket> {
        let mut batch = Vec::with_capacity(request.count as usize);

        for folio in folio_span(request.start_folio, request.count) {
            let created_at = Utc::now();
            let code = ticket_code(&request.series, &request.prefix, folio);
            let payload = TicketPayload {
                code: code.clone(),
                price: request.price,
                created_at,
            };

            let payload_image = match self.encoder.encode(&payload).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(
                        event = "payload_encode_failed",
                        code = %code,
                        error = %err,
                        "ticket keeps an empty payload image"
                    );
                    Vec::new()
                }
            };

            batch.push(Ticket {
                id: Uuid::new_v4(),
                series: request.series.clone(),
                prefix: request.prefix.clone(),
                folio,
                code,
                price: request.price,
                sold: false,
                payload_image,
                created_at,
            });
        }

        let existing = std::mem::take(&mut self.tickets);
        self.tickets = batch.iter().cloned().chain(existing).collect();
        self.persist();

        info!(
            event = "batch_generated",
            series = %request.series,
            start_folio = request.start_folio,
            count = batch.len(),
        );

        batch
    }

    pub fn mark_sold(&mut self, id: Uuid) {
        self.set_sold(id, true);
    }

    pub fn mark_unsold(&mut self, id: Uuid) {
        self.set_sold(id, false);
    }

    /// Sell the first unsold ticket in catalog order.
    pub fn mark_next_sold(&mut self) -> Option<Uuid> {
        let id = self.tickets.iter().find(|ticket| !ticket.sold)?.id;
        self.mark_sold(id);
        Some(id)
    }

    /// Mark every ticket sold, including already-sold ones.
    pub fn bulk_mark_sold(&mut self) {
        for ticket in &mut self.tickets {
            ticket.sold = true;
        }
        self.persist();
        info!(event = "bulk_marked_sold", total = self.tickets.len());
    }

    /// Remove at most one ticket; unknown ids are a no-op.
    pub fn remove(&mut self, id: Uuid) {
        let Some(index) = self.tickets.iter().position(|ticket| ticket.id == id) else {
            debug!(event = "unknown_ticket_id", %id, "remove ignored");
            return;
        };
        let removed = self.tickets.remove(index);
        self.persist();
        info!(event = "ticket_removed", code = %removed.code);
    }

    /// Empty the catalog. Obtaining explicit confirmation beforehand is the
    /// caller's obligation.
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.persist();
        info!(event = "catalog_cleared");
    }

    /// Always computed from the live collection, never cached.
    pub fn metrics(&self) -> CatalogMetrics {
        let total = self.tickets.len();
        let sold = self.tickets.iter().filter(|ticket| ticket.sold).count();
        CatalogMetrics {
            total,
            sold,
            available: total - sold,
        }
    }

    /// Tickets in catalog order (most recent batch first).
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn ticket(&self, id: Uuid) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| ticket.id == id)
    }

    fn set_sold(&mut self, id: Uuid, sold: bool) {
        let Some(ticket) = self.tickets.iter_mut().find(|ticket| ticket.id == id) else {
            debug!(event = "unknown_ticket_id", %id, "sold transition ignored");
            return;
        };
        if ticket.sold != sold {
            ticket.sold = sold;
            self.persist();
        }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.tickets) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(event = "catalog_encode_failed", error = %err, "catalog state not persisted");
                return;
            }
        };
        if let Err(err) = self.store.save(TICKETS_KEY, &raw) {
            warn!(event = "catalog_save_failed", error = %err, "catalog state not persisted");
        }
    }
}
