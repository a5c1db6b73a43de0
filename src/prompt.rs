//! System context and user prompt construction.
//!
//! Everything here is pure: the same document type and case data always
//! produce byte-identical prompts.

use std::fmt::Write;

use crate::case_data::{CaseData, FieldValue};
use crate::validator::ValidatedCase;
use crate::DocumentType;

/// System/user message pair sent to the completion API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt
{   pub system_context: String
  , pub user_prompt: String
}

/// Build the prompt pair for an already validated case
pub fn build(
  document_type: DocumentType
, case_data: &CaseData
) -> Prompt
{   Prompt
    {   system_context: system_context(document_type)
      , user_prompt: user_prompt(document_type, case_data)
    }
}

impl ValidatedCase<'_>
{   pub fn prompt(&self) -> Prompt
    {   build(self.document_type(), self.case_data())
    }
}

/// Persona, register and structure rules; depends only on the type
pub fn system_context(document_type: DocumentType) -> String
{   format!(
"Você é um especialista jurídico brasileiro sênior com 20 anos de experiência.
Domínio completo da legislação brasileira e da jurisprudência dos tribunais superiores.

TAREFA: Gerar {title} com excelência técnica.

PRINCÍPIOS:
- Linguagem jurídica formal e precisa
- Fundamentação em artigos de lei específicos
- Citação de jurisprudência relevante quando cabível
- Estrutura canônica do documento
- Análise estratégica de riscos
- Persuasão técnica fundamentada

FOCO DESTE DOCUMENTO:
{focus}

FORMATO:
- Documento COMPLETO e pronto para uso
- Formatação jurídica correta
- Divisões lógicas claras
- Conclusão com pedidos ou conclusões específicas e explícitas

Gere o melhor documento possível para o caso concreto.",
      title = document_type.display_name().to_uppercase(),
      focus = focus(document_type),
    )
}

fn focus(document_type: DocumentType) -> &'static str
{   match document_type
    {   DocumentType::PeticaoInicial => {
"- Endereçamento ao juízo competente e qualificação completa das partes
- Causa de pedir próxima e remota, com nexo entre fatos e direito
- Pedidos certos e determinados, valor da causa e, se for o caso, tutela de urgência (art. 300 do CPC)"
        }
      , DocumentType::Contestacao => {
"- Preliminares processuais antes do mérito (art. 337 do CPC)
- Impugnação específica de cada fato alegado pelo autor (art. 341 do CPC)
- Pedido de improcedência e especificação de provas"
        }
      , DocumentType::Contrato => {
"- Qualificação das partes contratantes e objeto delimitado
- Cláusulas de preço, prazo, obrigações, rescisão, penalidades e foro
- Equilíbrio contratual e conformidade com o Código Civil"
        }
      , DocumentType::ParecerJuridico => {
"- Ementa, relatório da consulta e delimitação da questão jurídica
- Análise doutrinária e jurisprudencial com posições divergentes
- Conclusão objetiva com avaliação de riscos e recomendações"
        }
      , DocumentType::NotificacaoExtrajudicial => {
"- Identificação de notificante e notificado
- Exposição clara dos fatos e do fundamento legal da exigência
- Prazo para cumprimento e consequências do descumprimento"
        }
    }
}

/// Task statement, serialized case data and required outline
pub fn user_prompt(
  document_type: DocumentType
, case_data: &CaseData
) -> String
{   let mut dados = String::new();
    render_case_data(&mut dados, case_data, 0);

    format!(
"GERE {title} JURÍDICO com máxima qualidade técnica.

TIPO DE DOCUMENTO: {name}

DADOS COMPLETOS DO CASO:
{dados}
ESTRUTURA SOLICITADA:
1. Cabeçalho formal com qualificação
2. Relato detalhado dos fatos
3. Fundamentação jurídica robusta
4. Pedidos específicos e claros
5. Conclusão formal

FUNDAMENTAÇÃO EXIGIDA:
- Cite artigos de lei aplicáveis
- Menção a jurisprudência pertinente
- Análise doutrinária quando cabível
- Argumentação lógica e persuasiva

Gere documento COMPLETO, PRONTO PARA PROTOCOLO, com todos os elementos essenciais. Não entregue esboço nem roteiro.",
      title = document_type.display_name().to_uppercase(),
      name = document_type.display_name(),
      dados = dados,
    )
}

/// Indented `key: value` listing. Text is written verbatim, so
/// multi-line values keep their own line breaks.
pub fn render_case_data(out: &mut String, case_data: &CaseData, depth: usize)
{   let indent = "  ".repeat(depth);
    for (name, value) in case_data.iter()
    {   match value
        {   FieldValue::Nested(inner) => {
              let _ = writeln!(out, "{}{}:", indent, name);
              render_case_data(out, inner, depth + 1);
            }
          , FieldValue::Text(s) => {
              let _ = writeln!(out, "{}{}: {}", indent, name, s);
            }
          , FieldValue::Number(n) => {
              let _ = writeln!(out, "{}{}: {}", indent, name, n);
            }
          , FieldValue::Flag(b) => {
              let _ = writeln!(
                out,
                "{}{}: {}",
                indent,
                name,
                if *b { "sim" } else { "não" }
              );
            }
        }
    }
}
