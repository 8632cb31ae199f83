use crate::error::ValueError;
use super::*;

impl Organization {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_sub_organization(&self) -> bool {
        self.parent_id.is_some()
    }
}

impl OrganizationTree {
    /// An organization may have a parent or children, never both.
    pub fn check_depth(&self) -> Result<(), ValueError> {
        if self.organization.is_sub_organization() && !self.children.is_empty() {
            Err(ValueError::HierarchyDepth {
                organization_id: self.organization.id,
            })
        } else {
            Ok(())
        }
    }
}

impl From<OrganizationTree> for Hierarchy {
    fn from(tree: OrganizationTree) -> Self {
        Self {
            own_org: Some(tree.organization),
            sub_orgs: tree.children,
            parent_org: tree.parent,
        }
    }
}
