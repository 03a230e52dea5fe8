//! Indicator book - all views of one project

use crate::error::{Error, Result};
use crate::view::IndicatorView;

/// Ordered collection of worksheet views belonging to one project
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorBook {
    views: Vec<IndicatorView>,
}

impl IndicatorBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of views
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Check if the book has no views
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Iterate over views in order
    pub fn views(&self) -> impl Iterator<Item = &IndicatorView> {
        self.views.iter()
    }

    /// Iterate over views mutably
    pub fn views_mut(&mut self) -> impl Iterator<Item = &mut IndicatorView> {
        self.views.iter_mut()
    }

    /// Get a view by index
    pub fn view_at(&self, index: usize) -> Option<&IndicatorView> {
        self.views.get(index)
    }

    /// Get a view by name
    pub fn view(&self, name: &str) -> Option<&IndicatorView> {
        self.views.iter().find(|v| v.name() == name)
    }

    /// Get a view by name, mutably
    pub fn view_mut(&mut self, name: &str) -> Option<&mut IndicatorView> {
        self.views.iter_mut().find(|v| v.name() == name)
    }

    /// Get the index of a view by name
    pub fn view_index(&self, name: &str) -> Option<usize> {
        self.views.iter().position(|v| v.name() == name)
    }

    /// Add a view seeded from the default template.
    ///
    /// The name is trimmed before validation. Returns the index of the view.
    pub fn add_view(&mut self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.validate_view_name(name, None)?;

        self.views.push(IndicatorView::new(name));
        log::debug!("added view '{}' ({} total)", name, self.views.len());
        Ok(self.views.len() - 1)
    }

    /// Add an existing view
    pub fn add_existing_view(&mut self, view: IndicatorView) -> Result<usize> {
        self.validate_view_name(view.name(), None)?;
        self.views.push(view);
        Ok(self.views.len() - 1)
    }

    /// Rename a view
    pub fn rename_view(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.views.len() {
            return Err(Error::ViewOutOfBounds(index, self.views.len()));
        }

        let new_name = new_name.trim();
        self.validate_view_name(new_name, Some(index))?;
        self.views[index].set_name(new_name);
        Ok(())
    }

    /// Remove a view. The last remaining view cannot be removed.
    pub fn remove_view(&mut self, index: usize) -> Result<IndicatorView> {
        if index >= self.views.len() {
            return Err(Error::ViewOutOfBounds(index, self.views.len()));
        }
        if self.views.len() == 1 {
            return Err(Error::LastView);
        }

        Ok(self.views.remove(index))
    }

    /// Move a view to a new position
    pub fn move_view(&mut self, from: usize, to: usize) -> Result<()> {
        if from >= self.views.len() {
            return Err(Error::ViewOutOfBounds(from, self.views.len()));
        }
        if to >= self.views.len() {
            return Err(Error::ViewOutOfBounds(to, self.views.len()));
        }

        let view = self.views.remove(from);
        self.views.insert(to, view);
        Ok(())
    }

    /// Swap a view with its predecessor. No-op for the first view.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        if index >= self.views.len() {
            return Err(Error::ViewOutOfBounds(index, self.views.len()));
        }
        if index > 0 {
            self.views.swap(index, index - 1);
        }
        Ok(())
    }

    /// Swap a view with its successor. No-op for the last view.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        if index >= self.views.len() {
            return Err(Error::ViewOutOfBounds(index, self.views.len()));
        }
        if index + 1 < self.views.len() {
            self.views.swap(index, index + 1);
        }
        Ok(())
    }

    /// Check every view name and every view's groups.
    ///
    /// Names must be non-empty, trimmed and unique. Books restored from
    /// storage bypass `add_view` and should be checked with this.
    pub fn validate(&self) -> Result<()> {
        for (i, view) in self.views.iter().enumerate() {
            if view.name() != view.name().trim() {
                return Err(Error::InvalidViewName(format!(
                    "View name has surrounding whitespace: '{}'",
                    view.name()
                )));
            }
            self.validate_view_name(view.name(), Some(i))?;
            view.validate()?;
        }
        Ok(())
    }

    fn validate_view_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidViewName("View name cannot be empty".into()));
        }

        for (i, view) in self.views.iter().enumerate() {
            if Some(i) != exclude_index && view.name() == name {
                return Err(Error::DuplicateViewName(name.into()));
            }
        }

        Ok(())
    }
}
