pub mod chart;
pub mod kpi_cards;
pub mod rejected_list;
pub mod results_table;
pub mod searchable_select;
pub mod sidebar;
