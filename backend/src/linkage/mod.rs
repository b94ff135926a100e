//! Keeps labels, products, their design assignment and the firmware sync
//! record pointing at each other.
//!
//! Each operation is a chain of independent store calls run in order. Nothing
//! is wrapped in a transaction: when a step fails the error is returned, the
//! remaining steps are skipped and the steps already applied stay applied.
//! Every successful mutation appends one command log entry; operations that
//! turn out to change nothing append none.

mod projection;

use crate::audit::{AuditEvent, AuditSink};
use crate::error::ServiceError;
use crate::store::collections as docs;
use crate::store::{DocumentStore, Filter};
use common::model::design::DesignAssignment;
use common::model::label::Label;
use common::model::product::{Product, ProductFields};
use common::requests::DesignSelection;
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

pub use projection::resolve_template;

#[derive(Debug, Clone, Serialize)]
pub struct LinkedPair {
    pub label: Label,
    pub product: Product,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relinked {
    pub label: Label,
    pub old_product: Product,
    pub new_product: Product,
}

pub struct LinkageMaintainer<'a> {
    store: &'a dyn DocumentStore,
    audit: &'a dyn AuditSink,
}

impl<'a> LinkageMaintainer<'a> {
    pub fn new(store: &'a dyn DocumentStore, audit: &'a dyn AuditSink) -> Self {
        Self { store, audit }
    }

    /// Registers a label under the id derived from its MAC address.
    pub fn create_label(&self, mac_address: &str) -> Result<Label, ServiceError> {
        let label = Label::new(mac_address);
        if label.id.is_empty() {
            return Err(ServiceError::Validation("MAC address is required".to_string()));
        }
        if docs::get_label(self.store, &label.id)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Label {} already exists",
                label.mac_address
            )));
        }

        docs::put_label(self.store, &label)?;
        info!("Label {} created", label.id);
        self.record(
            AuditEvent::new(
                format!("Cadastro da etiqueta: {}", label.mac_address),
                format!(
                    "Etiqueta com MAC Address {} foi cadastrada.",
                    label.mac_address
                ),
            )
            .label(&label.id),
        );
        Ok(label)
    }

    /// Stores a new product and, when asked, links it to a free label and
    /// applies a design to the pair.
    pub fn create_product(
        &self,
        fields: ProductFields,
        label_id: Option<&str>,
        design: Option<&DesignSelection>,
    ) -> Result<Product, ServiceError> {
        validate_design(design)?;
        let label = label_id.map(|id| self.load_free_label(id, None)).transpose()?;

        let product = Product::new(Uuid::new_v4().to_string(), fields);
        docs::put_product(self.store, &product)?;

        if let Some(label) = &label {
            self.join(label, &product)?;
            if let Some(design) = design {
                self.write_design(&label.id, &product.id, design)?;
            }
        }

        let product = self.load_product(&product.id)?;
        info!("Product {} created", product.id);
        self.record(with_label(
            AuditEvent::new(
                format!("Cadastro do produto: {}", product.fields.name),
                format!(
                    "Produto {} (SKU: {}) foi cadastrado.",
                    product.fields.name, product.fields.sku
                ),
            )
            .product(&product.id),
            product.label_id.as_deref(),
        ));
        Ok(product)
    }

    /// Rewrites the product's fields. A `label_id` different from the stored
    /// one moves the link: the old label is unlinked first, then the new one
    /// linked. The sync record is refreshed so the label shows the new data.
    pub fn update_product(
        &self,
        product_id: &str,
        fields: ProductFields,
        label_id: Option<&str>,
        design: Option<&DesignSelection>,
    ) -> Result<Product, ServiceError> {
        validate_design(design)?;
        let mut product = self.load_product(product_id)?;
        let old_label_id = product.label_id.clone();
        let label_changes = old_label_id.as_deref() != label_id;
        let new_label = match label_id {
            Some(id) if label_changes => Some(self.load_free_label(id, Some(product_id))?),
            _ => None,
        };

        product.fields = fields;
        docs::merge_product_fields(self.store, &product)?;

        if label_changes {
            if let Some(old_label_id) = old_label_id.as_deref() {
                self.sever(old_label_id, product_id)?;
            }
            if let Some(label) = &new_label {
                let product = self.load_product(product_id)?;
                self.join(label, &product)?;
            }
        }

        if let Some(linked_label) = label_id {
            match design {
                Some(design) => {
                    self.write_design(linked_label, product_id, design)?;
                }
                None => self.refresh_sync(linked_label, product_id)?,
            }
        }

        let product = self.load_product(product_id)?;
        info!("Product {} updated", product.id);
        self.record(with_label(
            AuditEvent::new(
                format!("Edição do produto: {}", product.fields.name),
                format!(
                    "Produto {} (SKU: {}) foi atualizado.",
                    product.fields.name, product.fields.sku
                ),
            )
            .product(&product.id),
            product.label_id.as_deref(),
        ));
        Ok(product)
    }

    /// Points the label at the product and the product at the label, in that
    /// order. Interrupted between the two writes, the records stay diverged.
    pub fn link(&self, label_id: &str, product_id: &str) -> Result<LinkedPair, ServiceError> {
        let label = self.load_label(label_id)?;
        let product = self.load_product(product_id)?;

        let changed = self.join(&label, &product)?;
        let pair = self.load_pair(label_id, product_id)?;
        if changed {
            info!("Label {label_id} linked to product {product_id}");
            self.record(
                AuditEvent::new(
                    format!("Associação da etiqueta: {}", pair.label.mac_address),
                    format!(
                        "Etiqueta {} associada ao produto {}.",
                        pair.label.mac_address, pair.product.fields.name
                    ),
                )
                .product(product_id)
                .label(label_id),
            );
        }
        Ok(pair)
    }

    /// Clears both references and drops the pair's design assignment and sync
    /// record. Unlinking a pair that is not linked is a silent no-op.
    pub fn unlink(&self, label_id: &str, product_id: &str) -> Result<LinkedPair, ServiceError> {
        let label = self.load_label(label_id)?;
        let product = self.load_product(product_id)?;

        let changed = self.sever(&label.id, &product.id)?;
        let pair = self.load_pair(label_id, product_id)?;
        if changed {
            info!("Label {label_id} unlinked from product {product_id}");
            self.record(
                AuditEvent::new(
                    format!("Desassociação da etiqueta: {}", pair.label.mac_address),
                    format!(
                        "Etiqueta {} desassociada do produto {}.",
                        pair.label.mac_address, pair.product.fields.name
                    ),
                )
                .product(product_id)
                .label(label_id),
            );
        }
        Ok(pair)
    }

    /// Moves a label from `old_product_id` to `new_product_id`: the old side
    /// is unlinked completely before the new side is linked. A failure while
    /// linking leaves the label unlinked.
    pub fn relink(
        &self,
        label_id: &str,
        old_product_id: &str,
        new_product_id: &str,
    ) -> Result<Relinked, ServiceError> {
        let label = self.load_label(label_id)?;
        self.load_product(old_product_id)?;
        self.load_product(new_product_id)?;

        self.sever(&label.id, old_product_id)?;

        let label = self.load_label(label_id)?;
        let new_product = self.load_product(new_product_id)?;
        self.join(&label, &new_product)?;

        let relinked = Relinked {
            label: self.load_label(label_id)?,
            old_product: self.load_product(old_product_id)?,
            new_product: self.load_product(new_product_id)?,
        };
        info!("Label {label_id} moved from product {old_product_id} to {new_product_id}");
        self.record(
            AuditEvent::new(
                format!("Troca de produto da etiqueta: {}", relinked.label.mac_address),
                format!(
                    "Etiqueta {} movida do produto {} para o produto {}.",
                    relinked.label.mac_address,
                    relinked.old_product.fields.name,
                    relinked.new_product.fields.name
                ),
            )
            .product(new_product_id)
            .label(label_id),
        );
        Ok(relinked)
    }

    /// Upserts the design assignment of a linked pair. With a template chosen
    /// the sync record is rebuilt; with no template the sync record of the
    /// label is removed. A pair that is not linked is a conflict.
    pub fn set_design(
        &self,
        product_id: &str,
        label_id: &str,
        selection: &DesignSelection,
    ) -> Result<DesignAssignment, ServiceError> {
        validate_design(Some(selection))?;
        let product = self.load_product(product_id)?;
        let label = self.load_label(label_id)?;
        if !linked_to_each_other(&label, &product) {
            return Err(ServiceError::Conflict(format!(
                "Label {} is not linked to product {}",
                label.mac_address, product.id
            )));
        }

        let design = self.write_design(&label.id, &product.id, selection)?;
        info!(
            "Design {:?} set for product {product_id} on label {label_id}",
            design.design_id
        );
        self.record(
            AuditEvent::new(
                format!("Edição de template da etiqueta: {}", label.mac_address),
                format!(
                    "Template {} definido para o produto {}.",
                    design.design_id.as_deref().unwrap_or("nenhum"),
                    product.fields.name
                ),
            )
            .product(product_id)
            .label(label_id),
        );
        Ok(design)
    }

    /// Unlinks the label's product, drops every design assignment naming the
    /// label, removes its sync record, then deletes the label.
    pub fn delete_label(&self, label_id: &str) -> Result<Label, ServiceError> {
        let label = self.load_label(label_id)?;

        for product_id in self.partners_of_label(&label)? {
            self.sever(&label.id, &product_id)?;
        }
        docs::delete_designs_where(self.store, "labelId", &label.id)?;
        docs::delete_sync(self.store, &label.mac_address)?;
        docs::delete_label(self.store, &label.id)?;

        info!("Label {label_id} deleted");
        self.record(
            AuditEvent::new(
                format!("Exclusão da etiqueta: {}", label.mac_address),
                format!(
                    "Etiqueta com MAC Address {} foi excluída.",
                    label.mac_address
                ),
            )
            .label(&label.id),
        );
        Ok(label)
    }

    /// Unlinks the product's label, drops every design assignment naming the
    /// product, removes that label's sync record, then deletes the product.
    pub fn delete_product(&self, product_id: &str) -> Result<Product, ServiceError> {
        let product = self.load_product(product_id)?;

        for label in self.partners_of_product(&product)? {
            self.sever(&label.id, &product.id)?;
            docs::delete_sync(self.store, &label.mac_address)?;
        }
        docs::delete_designs_where(self.store, "productId", &product.id)?;
        docs::delete_product(self.store, &product.id)?;

        info!("Product {product_id} deleted");
        self.record(
            AuditEvent::new(
                format!("Exclusão do produto: {}", product.fields.name),
                format!(
                    "Produto {} (SKU: {}) foi excluído.",
                    product.fields.name, product.fields.sku
                ),
            )
            .product(&product.id),
        );
        Ok(product)
    }

    fn load_label(&self, id: &str) -> Result<Label, ServiceError> {
        docs::get_label(self.store, id)?.ok_or_else(|| ServiceError::label_not_found(id))
    }

    fn load_product(&self, id: &str) -> Result<Product, ServiceError> {
        docs::get_product(self.store, id)?.ok_or_else(|| ServiceError::product_not_found(id))
    }

    fn load_pair(&self, label_id: &str, product_id: &str) -> Result<LinkedPair, ServiceError> {
        Ok(LinkedPair {
            label: self.load_label(label_id)?,
            product: self.load_product(product_id)?,
        })
    }

    /// A label that is unlinked, or already linked to `owner`.
    fn load_free_label(&self, id: &str, owner: Option<&str>) -> Result<Label, ServiceError> {
        let label = self.load_label(id)?;
        match label.product_id.as_deref() {
            Some(current) if Some(current) != owner => Err(ServiceError::Conflict(format!(
                "Label {} is already linked to product {current}",
                label.mac_address
            ))),
            _ => Ok(label),
        }
    }

    /// Writes whichever reference is missing, then rebuilds the sync record.
    /// Returns whether anything was written.
    fn join(&self, label: &Label, product: &Product) -> Result<bool, ServiceError> {
        if let Some(other) = label.product_id.as_deref().filter(|p| *p != product.id) {
            return Err(ServiceError::Conflict(format!(
                "Label {} is already linked to product {other}",
                label.mac_address
            )));
        }
        if let Some(other) = product.label_id.as_deref().filter(|l| *l != label.id) {
            return Err(ServiceError::Conflict(format!(
                "Product {} is already linked to label {other}",
                product.id
            )));
        }

        let mut changed = false;
        if !label.is_linked() {
            docs::set_label_product(self.store, &label.id, Some(&product.id))?;
            changed = true;
        }
        if !product.is_linked() {
            docs::set_product_label(self.store, &product.id, Some(&label.id))?;
            changed = true;
        }
        self.refresh_sync(&label.id, &product.id)?;
        Ok(changed)
    }

    /// Clears whichever of the two references still points at the other side,
    /// then drops the pair's design assignment and the label's sync record if
    /// it belongs to this product. Missing records are skipped. Returns
    /// whether anything was written.
    fn sever(&self, label_id: &str, product_id: &str) -> Result<bool, ServiceError> {
        let mut changed = false;

        let label = docs::get_label(self.store, label_id)?;
        if let Some(label) = &label {
            if label.product_id.as_deref() == Some(product_id) {
                docs::set_label_product(self.store, label_id, None)?;
                changed = true;
            }
        }
        if let Some(product) = docs::get_product(self.store, product_id)? {
            if product.label_id.as_deref() == Some(label_id) {
                docs::set_product_label(self.store, product_id, None)?;
                changed = true;
            }
        }
        if docs::get_design(self.store, product_id, label_id)?.is_some() {
            docs::delete_design(self.store, product_id, label_id)?;
            changed = true;
        }
        if let Some(label) = &label {
            if let Some(record) = docs::get_sync(self.store, &label.mac_address)? {
                if record.product_id == product_id {
                    docs::delete_sync(self.store, &label.mac_address)?;
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    /// Makes the label's sync record match the pair: present with the current
    /// data when linked with a template chosen, absent otherwise.
    fn refresh_sync(&self, label_id: &str, product_id: &str) -> Result<(), ServiceError> {
        let (Some(label), Some(product)) = (
            docs::get_label(self.store, label_id)?,
            docs::get_product(self.store, product_id)?,
        ) else {
            return Ok(());
        };

        let linked = linked_to_each_other(&label, &product);
        let record = if linked {
            docs::get_design(self.store, &product.id, &label.id)?
                .and_then(|design| projection::sync_record(&label, &product, &design))
        } else {
            None
        };

        match record {
            Some(record) => docs::put_sync(self.store, &record)?,
            None => {
                if let Some(existing) = docs::get_sync(self.store, &label.mac_address)? {
                    if linked || existing.product_id == product.id {
                        docs::delete_sync(self.store, &label.mac_address)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn write_design(
        &self,
        label_id: &str,
        product_id: &str,
        selection: &DesignSelection,
    ) -> Result<DesignAssignment, ServiceError> {
        let template =
            resolve_template(selection.design_id.as_deref()).map_err(ServiceError::Validation)?;
        let design_data = match template {
            Some(template) => crate::catalog::complete_fields(template, &selection.design_data),
            None => selection.design_data.clone(),
        };
        let design = DesignAssignment {
            product_id: product_id.to_string(),
            label_id: label_id.to_string(),
            design_id: selection.design_id.clone(),
            design_data,
        };
        docs::put_design(self.store, &design)?;

        if design.design_id.is_some() {
            self.refresh_sync(label_id, product_id)?;
        } else {
            let label = self.load_label(label_id)?;
            docs::delete_sync(self.store, &label.mac_address)?;
        }
        Ok(design)
    }

    fn partners_of_label(&self, label: &Label) -> Result<Vec<String>, ServiceError> {
        let mut partners: Vec<String> = label.product_id.iter().cloned().collect();
        for product in docs::list_products(self.store, &Filter::eq("labelId", label.id.as_str()))? {
            if !partners.contains(&product.id) {
                partners.push(product.id);
            }
        }
        Ok(partners)
    }

    fn partners_of_product(&self, product: &Product) -> Result<Vec<Label>, ServiceError> {
        let mut partners = Vec::new();
        if let Some(label) = product
            .label_id
            .as_deref()
            .map(|id| docs::get_label(self.store, id))
            .transpose()?
            .flatten()
        {
            partners.push(label);
        }
        for label in docs::list_labels(self.store, &Filter::eq("productId", product.id.as_str()))? {
            if !partners.iter().any(|l| l.id == label.id) {
                partners.push(label);
            }
        }
        Ok(partners)
    }

    fn record(&self, event: AuditEvent) {
        if let Err(err) = self.audit.append(event) {
            warn!("Failed to append command log entry: {err}");
        }
    }
}

fn validate_design(design: Option<&DesignSelection>) -> Result<(), ServiceError> {
    if let Some(design) = design {
        resolve_template(design.design_id.as_deref()).map_err(ServiceError::Validation)?;
    }
    Ok(())
}

fn linked_to_each_other(label: &Label, product: &Product) -> bool {
    label.product_id.as_deref() == Some(product.id.as_str())
        && product.label_id.as_deref() == Some(label.id.as_str())
}

fn with_label(event: AuditEvent, label_id: Option<&str>) -> AuditEvent {
    match label_id {
        Some(id) => event.label(id),
        None => event,
    }
}
