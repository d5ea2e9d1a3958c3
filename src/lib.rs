pub mod shared {
    pub mod core {
        pub mod api_response;
    }
}

pub mod modules {
    pub mod hotspot {
        pub mod core {
            pub mod errors;
            pub mod ports;
            pub mod question;
            pub mod similarity;
            pub mod validation;
        }
        pub mod use_cases {
            pub mod add_question {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_question {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod query_questions {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod browse_questions {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_questions {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod rebuild_index {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod hashing_embeddings;
                pub mod http_embeddings;
                pub mod in_memory_question_store;
                pub mod redis_question_store;
                pub mod redis_reply;
            }
        }
    }
}

pub mod shell;
