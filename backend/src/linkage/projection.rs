use crate::catalog::{self, Template};
use chrono::{SecondsFormat, Utc};
use common::model::design::DesignAssignment;
use common::model::label::Label;
use common::model::product::Product;
use common::model::sync::{SyncRecord, TemplateModel};

/// Builds the firmware projection for a linked pair. Returns `None` when no
/// template is selected.
pub fn sync_record(
    label: &Label,
    product: &Product,
    design: &DesignAssignment,
) -> Option<SyncRecord> {
    let template_id = design.design_id.as_deref()?;
    let fields = match catalog::find(template_id) {
        Some(template) => catalog::complete_fields(template, &design.design_data),
        None => design.design_data.clone(),
    };

    Some(SyncRecord {
        mac_address: label.mac_address.clone(),
        product_id: product.id.clone(),
        label_id: label.id.clone(),
        template: template_id.to_string(),
        template_model: TemplateModel {
            product: product.fields.clone(),
            fields,
        },
        updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Template lookup for a requested design id; `Ok(None)` clears the design.
pub fn resolve_template(design_id: Option<&str>) -> Result<Option<&'static Template>, String> {
    match design_id {
        None => Ok(None),
        Some(id) => catalog::find(id)
            .map(Some)
            .ok_or_else(|| format!("Unknown design '{id}'")),
    }
}
