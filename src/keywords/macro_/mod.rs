pub(crate) mod ignore_keywords;
pub(crate) mod maximum_minimum_related_keywords;
