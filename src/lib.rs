pub mod about;
pub mod digest;
pub mod dna_sequence;
pub mod enzymes;
pub mod error;
pub mod fragmenter;
pub mod id_registry;
pub mod iupac_code;
pub mod nucleotide_composition;
pub mod restriction_enzyme;
pub mod restriction_site;
pub mod settings;
pub mod site_export;
