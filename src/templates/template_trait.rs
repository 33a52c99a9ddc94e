use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait base para todos os modelos de documento gerados em Typst.
pub trait TypstTemplate: Send + Sync {
    /// Gera o corpo Typst a partir dos dados JSON.
    fn generate(&self, data: &Value) -> Result<String>;

    /// ID único do modelo.
    fn template_id(&self) -> &str;

    /// Valida que os dados contêm os campos obrigatórios.
    fn validate(&self, data: &Value) -> Result<()>;

    fn description(&self) -> &str {
        "Modelo de documento"
    }
}

/// Registry central dos modelos disponíveis.
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<dyn TypstTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let mut templates: HashMap<String, Arc<dyn TypstTemplate>> = HashMap::new();

        use crate::templates::templates::*;

        // Recibo A4 (cópia do talão azul)
        let classic = Arc::new(ReceiptClassicTemplate::new());
        templates.insert(classic.template_id().to_string(), classic);

        // Recibo bobina 80mm
        let thermal = Arc::new(ReceiptThermalTemplate::new());
        templates.insert(thermal.template_id().to_string(), thermal);

        Self { templates }
    }

    pub fn get(&self, template_id: &str) -> Option<Arc<dyn TypstTemplate>> {
        self.templates.get(template_id).cloned()
    }

    pub fn list(&self) -> Vec<(String, String)> {
        self.templates
            .iter()
            .map(|(id, template)| (id.clone(), template.description().to_string()))
            .collect()
    }

    pub fn exists(&self, template_id: &str) -> bool {
        self.templates.contains_key(template_id)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Utilidades compartilhadas para gerar elementos Typst
pub mod utils {
    /// Escapa caracteres especiais do Typst.
    pub fn escape_typst(text: &str) -> String {
        text.replace('@', "\\@")
            .replace('#', "\\#")
            .replace('$', "\\$")
            .replace('_', "\\_")
            .replace('*', "\\*")
    }
}
