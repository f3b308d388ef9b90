// src/services/documento_service.rs

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::db::{ClienteRepository, ContratoRepository};
use crate::models::contrato::TipoContrato;

#[derive(Clone)]
pub struct DocumentoService {
    contratos: ContratoRepository,
    clientes: ClienteRepository,
}

impl DocumentoService {
    pub fn new(contratos: ContratoRepository, clientes: ClienteRepository) -> Self {
        Self {
            contratos,
            clientes,
        }
    }

    pub async fn gerar_pdf_contrato(&self, contrato_id: Uuid) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let contrato = self
            .contratos
            .buscar_por_id(contrato_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Contrato {} não encontrado", contrato_id))
            })?;
        let cliente = self
            .clientes
            .buscar_por_id(contrato.cliente_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Cliente {} não encontrado", contrato.cliente_id))
            })?;

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Contrato {}", contrato.id));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        let titulo = match contrato.tipo {
            TipoContrato::AdministracaoImovel => "CONTRATO DE ADMINISTRAÇÃO DE IMÓVEL",
            TipoContrato::LocacaoTemporada => "CONTRATO DE LOCAÇÃO POR TEMPORADA",
        };
        doc.push(
            elements::Paragraph::new(titulo)
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(elements::Paragraph::new(format!(
            "Versão {} - {}",
            contrato.versao, contrato.status
        )));
        doc.push(elements::Paragraph::new(format!(
            "Gerado em {} por {}",
            contrato.gerado_em.format("%d/%m/%Y %H:%M"),
            contrato.gerado_por
        )));

        if let Some(reserva) = &contrato.stays_reserva_id {
            doc.push(elements::Paragraph::new(format!("Reserva: {}", reserva)));
        }

        doc.push(elements::Break::new(1.5));

        // --- CONTRATANTE ---
        doc.push(
            elements::Paragraph::new("CONTRATANTE")
                .styled(style::Style::new().bold().with_font_size(14)),
        );
        doc.push(elements::Paragraph::new(format!("Nome: {}", cliente.nome)));
        doc.push(elements::Paragraph::new(format!(
            "CPF: {}",
            cliente.cpf.unwrap_or("não informado".to_string())
        )));
        doc.push(elements::Paragraph::new(format!("E-mail: {}", cliente.email)));
        doc.push(elements::Paragraph::new(format!(
            "Telefone: {}",
            cliente.telefone.unwrap_or("não informado".to_string())
        )));

        doc.push(elements::Break::new(2));

        // --- CLÁUSULAS E DADOS VARIÁVEIS ---
        // Cada entrada de dados_contrato vira uma linha campo/valor.
        if let Some(dados) = contrato.dados_contrato.as_object() {
            if !dados.is_empty() {
                doc.push(
                    elements::Paragraph::new("CONDIÇÕES")
                        .styled(style::Style::new().bold().with_font_size(14)),
                );
                doc.push(elements::Break::new(1));

                let mut table = elements::TableLayout::new(vec![1, 2]);
                table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

                let style_bold = style::Style::new().bold();
                table
                    .row()
                    .element(elements::Paragraph::new("Campo").styled(style_bold))
                    .element(elements::Paragraph::new("Valor").styled(style_bold))
                    .push()
                    .expect("Table error");

                for (campo, valor) in dados {
                    table
                        .row()
                        .element(elements::Paragraph::new(campo.clone()))
                        .element(elements::Paragraph::new(valor_legivel(valor)))
                        .push()
                        .expect("Table row error");
                }

                doc.push(table);
                doc.push(elements::Break::new(2));
            }
        }

        // --- QR CODE DE CONFERÊNCIA ---
        // O QR carrega o id do contrato para localizar cópias impressas.
        let code = QrCode::new(contrato.id.to_string().as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        let dynamic_image = image::DynamicImage::ImageLuma8(image_buffer);

        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- RODAPÉ ---
        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new(format!(
                "Documento gerado eletronicamente. Identificador: {}",
                contrato.id
            ))
            .styled(style::Style::new().italic().with_font_size(8)),
        );

        // 3. Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

fn valor_legivel(valor: &serde_json::Value) -> String {
    match valor {
        serde_json::Value::String(texto) => texto.clone(),
        outro => outro.to_string(),
    }
}
