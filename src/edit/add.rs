//! Adding busbars and strings

use super::{clean_name, require_finite};
use crate::catalog::CellTypeCatalog;
use crate::config::BusbarSettings;
use crate::document::IdfDocument;
use crate::error::{IdfError, Result};
use crate::model::{ComponentOutline, ComponentPlacement, ComponentType, IdFamily, PlacementVector};
use crate::strings::{generate, generate_outline, StringParameters};
use crate::types::normalize_angle;

/// Request to place a busbar
#[derive(Debug, Clone, PartialEq)]
pub struct BusbarSpec {
    /// Outline name; `None` picks [`IdfDocument::next_busbar_name`]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    /// Outline length, defaulting to the configured busbar length
    pub length: Option<f64>,
    /// Outline width, defaulting to the configured busbar width
    pub width: Option<f64>,
    /// Start on the high height variant
    pub raised: bool,
}

impl BusbarSpec {
    /// Default-sized, unraised busbar with a generated name
    pub fn at(x: f64, y: f64, rotation: f64) -> Self {
        BusbarSpec {
            name: None,
            x,
            y,
            rotation,
            length: None,
            width: None,
            raised: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl IdfDocument {
    /// Name for the next busbar outline: `{base}_{index:03}`, where `base`
    /// is the prefix of the last busbar name (or `sbar`) and the index
    /// starts at the busbar count and skips names already taken.
    pub fn next_busbar_name(&self) -> String {
        let busbars = self.busbar_names();
        let base = busbars
            .last()
            .and_then(|name| name.split('_').next())
            .filter(|base| !base.is_empty())
            .unwrap_or("sbar")
            .to_string();
        let mut index = busbars.len();
        loop {
            let name = format!("{}_{:03}", base, index);
            if self.outline(&name).is_none() {
                return name;
            }
            index += 1;
        }
    }

    /// Place a busbar, creating its outline when the name is new. Returns
    /// the id of the new placement.
    pub fn add_busbar(&mut self, spec: &BusbarSpec, settings: &BusbarSettings) -> Result<String> {
        require_finite("x", spec.x)?;
        require_finite("y", spec.y)?;
        require_finite("rotation", spec.rotation)?;
        let name = match &spec.name {
            Some(name) => clean_name("name", name)?.to_string(),
            None => self.next_busbar_name(),
        };

        match self.outline(&name) {
            Some(existing) if existing.component_type != ComponentType::Busbar => {
                return Err(IdfError::validation(
                    "name",
                    format!("'{}' is a {}, not a busbar", name, existing.component_type),
                ));
            }
            Some(_) => {}
            None => {
                if ComponentType::classify(&name) != ComponentType::Busbar {
                    return Err(IdfError::validation(
                        "name",
                        format!("'{}' does not name a busbar", name),
                    ));
                }
                let length = spec.length.unwrap_or(settings.length);
                let width = spec.width.unwrap_or(settings.width);
                if !(length.is_finite() && length > 0.0 && width.is_finite() && width > 0.0) {
                    return Err(IdfError::validation(
                        "length/width",
                        "busbar dimensions must be greater than zero",
                    ));
                }
                let outline = ComponentOutline::rectangle(
                    name.clone(),
                    length,
                    width,
                    settings.height_for(spec.raised),
                );
                self.add_outline(outline)?;
                self.set_raised_flag(&name, spec.raised);
            }
        }

        let id = self.mint_id(IdFamily::Busbar);
        let placement = ComponentPlacement::new(
            id.clone(),
            name.clone(),
            ComponentType::Busbar,
            PlacementVector::new(spec.x, spec.y, normalize_angle(spec.rotation)),
        );
        self.add_placement(placement)?;
        tracing::info!(id = %id, name = %name, "added busbar");
        Ok(id)
    }

    /// Generate and register a new string outline. Returns its name.
    ///
    /// Without a name the conventional one from the parameters is used. The
    /// outline is drawn after every busbar and string already present.
    pub fn define_string(
        &mut self,
        params: &StringParameters,
        name: Option<&str>,
        catalog: &CellTypeCatalog,
    ) -> Result<String> {
        let name = match name {
            Some(name) => clean_name("name", name)?.to_string(),
            None => params.default_name(),
        };
        if ComponentType::classify(&name) != ComponentType::String {
            return Err(IdfError::validation(
                "name",
                format!("'{}' does not name a string", name),
            ));
        }
        if self.outline(&name).is_some() {
            return Err(IdfError::Consistency(format!("outline '{}' already exists", name)));
        }

        let ordinal = self.busbar_names().len() + self.string_names().len();
        let outline = generate_outline(name.clone(), params, catalog, Some(ordinal))?;
        self.add_outline(outline)?;
        tracing::info!(name = %name, "defined string outline");
        Ok(name)
    }

    /// Place an existing string outline. Returns the id of the new placement.
    pub fn add_string(&mut self, name: &str, x: f64, y: f64, rotation: f64) -> Result<String> {
        require_finite("x", x)?;
        require_finite("y", y)?;
        require_finite("rotation", rotation)?;
        let outline = self.require_outline(name)?;
        if outline.component_type != ComponentType::String {
            return Err(IdfError::validation(
                "name",
                format!("'{}' is a {}, not a string", name, outline.component_type),
            ));
        }

        let id = self.mint_id(IdFamily::String);
        let placement = ComponentPlacement::new(
            id.clone(),
            name,
            ComponentType::String,
            PlacementVector::new(x, y, normalize_angle(rotation)),
        );
        self.add_placement(placement)?;
        tracing::info!(id = %id, name, "added string");
        Ok(id)
    }

    /// Regenerate a string outline from new parameters, optionally under a
    /// new name. Placements follow the rename. Returns the final name.
    ///
    /// A blank `new_name` selects the conventional name for `params`.
    pub fn redefine_string(
        &mut self,
        name: &str,
        params: &StringParameters,
        new_name: Option<&str>,
        catalog: &CellTypeCatalog,
    ) -> Result<String> {
        let outline = self.require_outline(name)?;
        if outline.component_type != ComponentType::String {
            return Err(IdfError::validation(
                "name",
                format!("'{}' is a {}, not a string", name, outline.component_type),
            ));
        }
        let target = match new_name.map(str::trim) {
            Some(n) if !n.is_empty() => clean_name("new_name", n)?.to_string(),
            _ => params.default_name(),
        };
        if target != name {
            if ComponentType::classify(&target) != ComponentType::String {
                return Err(IdfError::validation(
                    "new_name",
                    format!("'{}' does not name a string", target),
                ));
            }
            if self.outline(&target).is_some() {
                return Err(IdfError::Consistency(format!(
                    "cannot rename '{}': outline '{}' already exists",
                    name, target
                )));
            }
        }

        let strings = self.string_names();
        let index = strings.iter().position(|s| *s == name).unwrap_or(strings.len());
        let ordinal = self.busbar_names().len() + index;
        let vertices = generate(params, catalog, Some(ordinal))?;

        if let Some(outline) = self.outline_mut(name) {
            outline.vertices = vertices;
        }
        if target != name {
            self.rekey_outline(name, &target);
        }
        tracing::info!(old = name, new = %target, "redefined string outline");
        Ok(target)
    }
}
