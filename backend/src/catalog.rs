//! The fixed set of label templates users can pick from.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub image_url: &'static str,
    pub fields: &'static [&'static str],
}

pub static TEMPLATES: &[Template] = &[
    Template {
        id: "template-1",
        name: "Template Padrão",
        image_url: "/images/template1.jpg",
        fields: &["Nome do Produto", "Valor", "SKU", "Data"],
    },
    Template {
        id: "template-2",
        name: "Template Promoção",
        image_url: "/images/template2.jpg",
        fields: &["Nome do Produto", "Valor Original", "Valor Promocional", "Desconto"],
    },
    Template {
        id: "template-3",
        name: "Template QR Code",
        image_url: "/images/template3.jpg",
        fields: &["Nome do Produto", "Valor", "Info", "QR Code Data"],
    },
    Template {
        id: "template-4",
        name: "Template Nutricional",
        image_url: "/images/template4.jpg",
        fields: &["Nome do Produto", "Valor", "Valor por Unidade"],
    },
    Template {
        id: "template-5",
        name: "Template Colunas",
        image_url: "/images/template5.jpg",
        fields: &["Nome do Produto", "Valor", "Info Coluna 1", "Info Coluna 2"],
    },
    Template {
        id: "template-6",
        name: "Template Minimalista",
        image_url: "/images/template6.jpg",
        fields: &["Nome do Produto", "Valor"],
    },
    Template {
        id: "template-7",
        name: "Template com Imagem",
        image_url: "/images/template7.jpg",
        fields: &["Nome do Produto", "Valor", "URL da Imagem"],
    },
    Template {
        id: "template-8",
        name: "Template de Alerta",
        image_url: "/images/template8.jpg",
        fields: &["Nome do Produto", "Valor", "Mensagem de Alerta"],
    },
];

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Returns `data` with every field of `template` present; blanks are `""`.
/// Values for fields the template does not declare are kept.
pub fn complete_fields(
    template: &Template,
    data: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut complete = data.clone();
    for field in template.fields {
        complete.entry((*field).to_string()).or_default();
    }
    complete
}
