// Stateval - Stationary Distribution Benchmark Evaluation
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Roles the tools play during evaluation.

/// Which precision tag, and which tools, have special meaning.
///
/// # Examples
///
/// ```rust
/// use stateval_core::ToolRoles;
///
/// let roles = ToolRoles::default();
/// assert!(roles.is_exact("ignored"));
/// assert!(roles.is_compared_tool("storm"));
/// assert!(roles.is_bare_export_tool("prism"));
/// assert!(roles.is_reference_tool("sds"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToolRoles {
    /// Precision tag of the exact run each benchmark is compared against.
    pub exact_precision: String,
    /// Tool whose marker-tagged exports are compared value by value.
    pub compared_tool: String,
    /// Tools exporting bare numbers; only their total mass is checked.
    pub bare_export_tools: Vec<String>,
    /// Tool that produces no export and has nothing to compare against.
    pub reference_tool: String,
}

impl Default for ToolRoles {
    fn default() -> Self {
        Self {
            exact_precision: "ignored".to_string(),
            compared_tool: "storm".to_string(),
            bare_export_tools: vec!["prism".to_string()],
            reference_tool: "sds".to_string(),
        }
    }
}

impl ToolRoles {
    pub fn is_exact(&self, precision: &str) -> bool {
        self.exact_precision == precision
    }

    pub fn is_compared_tool(&self, tool: &str) -> bool {
        self.compared_tool == tool
    }

    pub fn is_bare_export_tool(&self, tool: &str) -> bool {
        self.bare_export_tools.iter().any(|t| t == tool)
    }

    pub fn is_reference_tool(&self, tool: &str) -> bool {
        self.reference_tool == tool
    }
}
